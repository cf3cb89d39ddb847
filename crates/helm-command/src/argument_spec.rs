use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use helm_core::Snowflake;
use serde::{Deserialize, Serialize};

use crate::message_catalog::MessageId;

/// Value kind a declared argument coerces to. Order of variants matches the
/// platform option-type vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentKind {
    String,
    Integer,
    Boolean,
    User,
    Channel,
    Role,
    Mentionable,
    Number,
}

impl ArgumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::User => "user",
            Self::Channel => "channel",
            Self::Role => "role",
            Self::Mentionable => "mentionable",
            Self::Number => "number",
        }
    }
}

impl fmt::Display for ArgumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate offered to a caller still typing an argument value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteChoice {
    pub name: String,
    pub value: String,
}

impl AutocompleteChoice {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Produces suggestions for a partially typed argument value.
#[async_trait]
pub trait AutocompleteHandler: Send + Sync {
    async fn suggest(&self, guild_id: Snowflake, partial: &str) -> Result<Vec<AutocompleteChoice>>;
}

/// Declared argument of a command. Registration order is positionally
/// significant and must match the handler's declared parameter kinds.
#[derive(Clone)]
pub struct ArgumentSpec {
    pub name: String,
    pub kind: ArgumentKind,
    pub required: bool,
    pub free_text_compatible: bool,
    pub invalid_message: MessageId,
    pub autocomplete: Option<Arc<dyn AutocompleteHandler>>,
}

impl ArgumentSpec {
    pub fn new(name: impl Into<String>, kind: ArgumentKind, required: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            required,
            free_text_compatible: true,
            invalid_message: MessageId::InvalidArgument,
            autocomplete: None,
        }
    }

    pub fn invalid_message(mut self, id: MessageId) -> Self {
        self.invalid_message = id;
        self
    }

    pub fn interaction_typed_only(mut self) -> Self {
        self.free_text_compatible = false;
        self
    }

    pub fn with_autocomplete(mut self, handler: Arc<dyn AutocompleteHandler>) -> Self {
        self.autocomplete = Some(handler);
        self
    }
}

impl fmt::Debug for ArgumentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentSpec")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("free_text_compatible", &self.free_text_compatible)
            .field("invalid_message", &self.invalid_message)
            .field("autocomplete", &self.autocomplete.is_some())
            .finish()
    }
}
