//! User-visible message identifiers and the translation collaborator seam.
//!
//! Actual translation-string resolution lives outside this workspace; the
//! engine only ever names messages by id and asks a catalog to render them.

use serde::{Deserialize, Serialize};

/// Identifier of a user-visible message. Rejections and invalid-input
/// replies reference these instead of literal strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageId {
    MainSurfaceOnly,
    InteractionOnly,
    NoPermission,
    AdminOnly,
    HelperOnly,
    PremiumOnly,
    InvalidArgument,
    InvalidNumber,
    InvalidBoolean,
    InvalidUser,
    InvalidChannel,
    InvalidRole,
    InvalidMentionable,
}

/// Renders a message id into a user-facing string.
pub trait MessageCatalog: Send + Sync {
    fn render(&self, id: MessageId) -> String;
}

/// Built-in English catalog, used as the fallback and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishCatalog;

impl MessageCatalog for EnglishCatalog {
    fn render(&self, id: MessageId) -> String {
        let text = match id {
            MessageId::MainSurfaceOnly => "This command is only available on the main bot.",
            MessageId::InteractionOnly => {
                "This command can only be used as a slash command."
            }
            MessageId::NoPermission => "You do not have permission to use this command.",
            MessageId::AdminOnly => "This command is restricted to bot administrators.",
            MessageId::HelperOnly => "This command is restricted to bot helpers.",
            MessageId::PremiumOnly => "This command requires an active premium subscription.",
            MessageId::InvalidArgument => "Invalid argument provided.",
            MessageId::InvalidNumber => "Expected a number.",
            MessageId::InvalidBoolean => "Expected true or false.",
            MessageId::InvalidUser => "Expected a user mention.",
            MessageId::InvalidChannel => "Expected a channel mention.",
            MessageId::InvalidRole => "Expected a role mention.",
            MessageId::InvalidMentionable => "Expected a user or role mention.",
        };
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{EnglishCatalog, MessageCatalog, MessageId};

    #[test]
    fn unit_english_catalog_renders_every_id_non_empty() {
        let catalog = EnglishCatalog;
        for id in [
            MessageId::MainSurfaceOnly,
            MessageId::InteractionOnly,
            MessageId::NoPermission,
            MessageId::AdminOnly,
            MessageId::HelperOnly,
            MessageId::PremiumOnly,
            MessageId::InvalidArgument,
            MessageId::InvalidNumber,
            MessageId::InvalidBoolean,
            MessageId::InvalidUser,
            MessageId::InvalidChannel,
            MessageId::InvalidRole,
            MessageId::InvalidMentionable,
        ] {
            assert!(!catalog.render(id).is_empty(), "empty render for {id:?}");
        }
    }
}
