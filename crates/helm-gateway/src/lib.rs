//! HTTP ingestion for Helm: sharder envelopes in, platform interaction
//! responses out.

pub mod envelopes;
pub mod interaction_response;
pub mod server;

pub use envelopes::{
    EventEnvelope, InteractionEnvelope, INTERACTION_APPLICATION_COMMAND,
    INTERACTION_AUTOCOMPLETE, INTERACTION_MESSAGE_COMPONENT, INTERACTION_MODAL_SUBMIT,
};
pub use interaction_response::{
    autocomplete_response, deferred_message_response, deferred_update_response, message_response,
};
pub use server::{
    build_gateway_router, run_gateway_server, GatewayConfig, EVENT_ENDPOINT, INTERACTION_ENDPOINT,
};
