//! Wire envelopes posted by the sharder. Each envelope wraps one platform
//! payload plus the identity of the bot deployment that received it.

use helm_core::Snowflake;
use helm_dispatch::InboundMessage;
use serde::Deserialize;
use serde_json::Value;

/// Interaction discriminants as carried on the wire.
pub const INTERACTION_APPLICATION_COMMAND: u8 = 2;
pub const INTERACTION_MESSAGE_COMPONENT: u8 = 3;
pub const INTERACTION_AUTOCOMPLETE: u8 = 4;
pub const INTERACTION_MODAL_SUBMIT: u8 = 5;

/// Envelope for `POST /event`: a free-text chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct EventEnvelope {
    pub bot_id: Snowflake,
    #[serde(default)]
    pub is_whitelabel: bool,
    #[serde(default)]
    pub shard_id: u32,
    pub event: InboundMessage,
}

/// Envelope for `POST /interaction`. The inner payload is left raw until the
/// discriminant picks the shape to decode it into.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionEnvelope {
    pub bot_id: Snowflake,
    #[serde(default)]
    pub is_whitelabel: bool,
    pub interaction_type: u8,
    pub event: Value,
}
