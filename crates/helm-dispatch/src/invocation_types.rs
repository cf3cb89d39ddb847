//! Inbound invocation shapes after envelope decoding. These mirror the inner
//! platform payloads; the gateway crate deserializes directly into them.

use helm_core::Snowflake;
use serde::Deserialize;
use serde_json::Value;

/// Which deployment surface received the event. Secondary surfaces are
/// white-labeled deployments; main-surface-only commands refuse them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Main,
    Whitelabel,
}

impl SurfaceKind {
    pub fn from_whitelabel_flag(is_whitelabel: bool) -> Self {
        if is_whitelabel {
            Self::Whitelabel
        } else {
            Self::Main
        }
    }
}

/// A free-text chat message as delivered by the platform event stream.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(default)]
    pub guild_id: Snowflake,
    pub author: MessageAuthor,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageAuthor {
    pub id: Snowflake,
    #[serde(default)]
    pub bot: bool,
}

/// One node of the structured option tree. Subcommand nodes carry nested
/// options and no value; leaf nodes carry a typed value. `focused` marks the
/// argument an autocomplete request is about.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandOption {
    pub name: String,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub options: Vec<CommandOption>,
    #[serde(default)]
    pub focused: bool,
}

impl CommandOption {
    /// Value and options are mutually exclusive on the wire; a node without
    /// a value is a subcommand.
    pub fn is_subcommand(&self) -> bool {
        self.value.is_none()
    }
}

/// Caller identity as supplied on interaction payloads: either a guild
/// member (with nested user) or a bare user for DM-capable surfaces.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionCaller {
    #[serde(default)]
    pub member: Option<MemberRef>,
    #[serde(default)]
    pub user: Option<UserRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberRef {
    pub user: UserRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRef {
    pub id: Snowflake,
}

impl InteractionCaller {
    pub fn user_id(&self) -> Snowflake {
        if let Some(member) = &self.member {
            member.user.id
        } else if let Some(user) = &self.user {
            user.id
        } else {
            Snowflake(0)
        }
    }
}

/// An application-command (slash command) invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationCommandInvocation {
    pub token: String,
    #[serde(default)]
    pub guild_id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(flatten)]
    pub caller: InteractionCaller,
    pub data: ApplicationCommandData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationCommandData {
    pub name: String,
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

/// A message-component (button/select) invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentInvocation {
    pub token: String,
    #[serde(default)]
    pub guild_id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(flatten)]
    pub caller: InteractionCaller,
    pub data: ComponentData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComponentData {
    pub custom_id: String,
}

/// An autocomplete request for a partially typed argument.
#[derive(Debug, Clone, Deserialize)]
pub struct AutocompleteInvocation {
    #[serde(default)]
    pub guild_id: Snowflake,
    pub data: ApplicationCommandData,
}

/// A modal submission.
#[derive(Debug, Clone, Deserialize)]
pub struct ModalInvocation {
    pub token: String,
    #[serde(default)]
    pub guild_id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(flatten)]
    pub caller: InteractionCaller,
    pub data: ModalData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModalData {
    pub custom_id: String,
    #[serde(default)]
    pub components: Vec<ModalRow>,
}

/// Modal inputs arrive wrapped in action rows.
#[derive(Debug, Clone, Deserialize)]
pub struct ModalRow {
    #[serde(default)]
    pub components: Vec<ModalInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModalInput {
    pub custom_id: String,
    #[serde(default)]
    pub value: String,
}
