//! Argument coercion: turns free-text tokens or platform-typed option values
//! into the positional argument set the resolved handler expects.

use helm_command::{ArgumentKind, ArgumentSpec, ArgumentValue, MessageId, ParsedArgumentSet};
use helm_core::{parse_channel_mention, parse_role_mention, parse_user_mention, Snowflake};
use serde_json::Value;
use thiserror::Error;

use crate::invocation_types::CommandOption;

/// A required argument failed coercion; the invocation is rejected with the
/// argument's configured invalid-input message and the handler never runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("required argument failed coercion")]
pub struct CoercionError {
    pub message: MessageId,
}

/// Coerces free-text tokens against the declared specs, in registration
/// order, over a shared cursor. Optional arguments that fail coercion
/// resolve to `Absent` and leave the cursor in place, so the failed token is
/// offered to the next argument.
pub fn coerce_free_text(
    specs: &[ArgumentSpec],
    tokens: &[String],
) -> Result<ParsedArgumentSet, CoercionError> {
    let mut values = Vec::with_capacity(specs.len());
    let mut cursor = 0usize;

    for spec in specs {
        if !spec.free_text_compatible {
            values.push(ArgumentValue::Absent);
            continue;
        }

        if cursor >= tokens.len() {
            if spec.required {
                return Err(CoercionError {
                    message: spec.invalid_message,
                });
            }
            values.push(ArgumentValue::Absent);
            continue;
        }

        let token = tokens[cursor].as_str();
        let coerced = match spec.kind {
            ArgumentKind::String => {
                // Greedy: join everything that is left. Registry validation
                // guarantees this is the final argument.
                let joined = tokens[cursor..].join(" ");
                cursor = tokens.len();
                Some(ArgumentValue::String(joined))
            }
            ArgumentKind::Integer => token.parse::<i64>().ok().map(ArgumentValue::Integer),
            ArgumentKind::Number => token.parse::<f64>().ok().map(ArgumentValue::Number),
            ArgumentKind::Boolean => parse_boolean_literal(token).map(ArgumentValue::Boolean),
            ArgumentKind::User => parse_user_mention(token).map(ArgumentValue::User),
            ArgumentKind::Channel => parse_channel_mention(token).map(ArgumentValue::Channel),
            ArgumentKind::Role => parse_role_mention(token).map(ArgumentValue::Role),
            ArgumentKind::Mentionable => parse_role_mention(token)
                .or_else(|| parse_user_mention(token))
                .map(ArgumentValue::Mentionable),
        };

        match coerced {
            Some(value) => {
                if spec.kind != ArgumentKind::String {
                    cursor += 1;
                }
                values.push(value);
            }
            None => {
                if spec.required {
                    return Err(CoercionError {
                        message: spec.invalid_message,
                    });
                }
                // Cursor intentionally stays put.
                values.push(ArgumentValue::Absent);
            }
        }
    }

    Ok(ParsedArgumentSet::new(values))
}

/// Re-maps platform-typed interaction option values into the handler's
/// positional order. The platform has already validated types; this only
/// reorders, synthesizing `Absent` for any optional argument it omitted.
pub fn remap_interaction_options(
    specs: &[ArgumentSpec],
    options: &[CommandOption],
) -> Result<ParsedArgumentSet, CoercionError> {
    let mut values = Vec::with_capacity(specs.len());

    for spec in specs {
        let supplied = options
            .iter()
            .find(|option| option.name.eq_ignore_ascii_case(&spec.name))
            .and_then(|option| option.value.as_ref());

        let coerced = supplied.and_then(|value| typed_value(spec.kind, value));
        match coerced {
            Some(value) => values.push(value),
            None if spec.required => {
                return Err(CoercionError {
                    message: spec.invalid_message,
                });
            }
            None => values.push(ArgumentValue::Absent),
        }
    }

    Ok(ParsedArgumentSet::new(values))
}

fn typed_value(kind: ArgumentKind, value: &Value) -> Option<ArgumentValue> {
    match kind {
        ArgumentKind::String => value.as_str().map(|s| ArgumentValue::String(s.to_string())),
        ArgumentKind::Integer => value.as_i64().map(ArgumentValue::Integer),
        ArgumentKind::Number => value.as_f64().map(ArgumentValue::Number),
        ArgumentKind::Boolean => value.as_bool().map(ArgumentValue::Boolean),
        ArgumentKind::User => reference_id(value).map(ArgumentValue::User),
        ArgumentKind::Channel => reference_id(value).map(ArgumentValue::Channel),
        ArgumentKind::Role => reference_id(value).map(ArgumentValue::Role),
        ArgumentKind::Mentionable => reference_id(value).map(ArgumentValue::Mentionable),
    }
}

/// Reference values arrive either as bare integers or as decimal strings.
fn reference_id(value: &Value) -> Option<Snowflake> {
    if let Some(raw) = value.as_u64() {
        return Some(Snowflake(raw));
    }
    value.as_str().and_then(|s| s.parse::<Snowflake>().ok())
}

fn parse_boolean_literal(token: &str) -> Option<bool> {
    match token.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "1" => Some(true),
        "false" | "f" | "no" | "0" => Some(false),
        _ => None,
    }
}
