//! Invocation pipeline for Helm: resolution, authorization, argument
//! coercion, concurrent handler dispatch, and the deferred-response broker.

pub mod argument_coercer;
pub mod autocomplete_router;
pub mod collaborators;
pub mod command_authorizer;
pub mod command_dispatcher;
pub mod command_resolver;
pub mod dispatch_engine;
pub mod invocation_types;
pub mod reply_sinks;
pub mod response_broker;

#[cfg(test)]
pub(crate) mod test_support;

pub use argument_coercer::{coerce_free_text, remap_interaction_options, CoercionError};
pub use autocomplete_router::{route_autocomplete, MAX_AUTOCOMPLETE_CHOICES};
pub use collaborators::{
    ChatTransport, Collaborators, ErrorContext, ErrorReporter, InteractionEditor,
    PermissionLookup, PremiumLookup, PrivilegedUserDirectory, UsageMetrics,
};
pub use command_authorizer::{authorize, AuthorizationFailure, AuthorizedFacts, InvocationSource};
pub use command_dispatcher::{dispatch_handler, schedule_message_deletion};
pub use command_resolver::{
    resolve_free_text, resolve_interaction_path, FreeTextResolution, InteractionResolution,
};
pub use dispatch_engine::{DispatchEngine, EngineConfig};
pub use invocation_types::{
    ApplicationCommandData, ApplicationCommandInvocation, AutocompleteInvocation,
    CommandOption, ComponentData, ComponentInvocation, InboundMessage, InteractionCaller,
    MemberRef, MessageAuthor, ModalData, ModalInput, ModalInvocation, ModalRow, SurfaceKind,
    UserRef,
};
pub use reply_sinks::{pending_result, ChannelReplySink, PendingResultSink};
pub use response_broker::{BrokerConfig, BrokerState, InitialResponse, ResponseBroker};
