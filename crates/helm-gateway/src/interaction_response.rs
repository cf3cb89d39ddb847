//! Builders for the platform's interaction response bodies. The numeric
//! response types and the ephemeral flag value are fixed by the platform.

use helm_command::{AutocompleteChoice, ReplyPayload};
use serde_json::{json, Value};

const RESPONSE_CHANNEL_MESSAGE: u8 = 4;
const RESPONSE_DEFERRED_CHANNEL_MESSAGE: u8 = 5;
const RESPONSE_DEFERRED_MESSAGE_UPDATE: u8 = 6;
const RESPONSE_AUTOCOMPLETE_RESULT: u8 = 8;

const EPHEMERAL_FLAG: u64 = 1 << 6;

/// Immediate message response carrying the handler's reply.
pub fn message_response(reply: &ReplyPayload) -> Value {
    json!({
        "type": RESPONSE_CHANNEL_MESSAGE,
        "data": {
            "content": reply.content,
            "flags": if reply.ephemeral { EPHEMERAL_FLAG } else { 0 },
        }
    })
}

/// Deferred acknowledgement for an application command: "thinking" state,
/// edited later by the follow-up.
pub fn deferred_message_response(ephemeral: bool) -> Value {
    json!({
        "type": RESPONSE_DEFERRED_CHANNEL_MESSAGE,
        "data": {
            "flags": if ephemeral { EPHEMERAL_FLAG } else { 0 },
        }
    })
}

/// Deferred acknowledgement for a message component: the source message is
/// updated in place once the follow-up lands.
pub fn deferred_update_response() -> Value {
    json!({ "type": RESPONSE_DEFERRED_MESSAGE_UPDATE })
}

/// Autocomplete candidate list. Caller enforces the platform cap.
pub fn autocomplete_response(choices: &[AutocompleteChoice]) -> Value {
    let choices: Vec<Value> = choices
        .iter()
        .map(|choice| json!({"name": choice.name, "value": choice.value}))
        .collect();
    json!({
        "type": RESPONSE_AUTOCOMPLETE_RESULT,
        "data": { "choices": choices }
    })
}
