use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Content of one reply to the caller, whether delivered synchronously, as a
/// deferred follow-up, or as a plain chat message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyPayload {
    pub content: String,
    #[serde(default)]
    pub ephemeral: bool,
}

impl ReplyPayload {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: false,
        }
    }

    pub fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }
}

/// Destination for an invocation's reply. Interaction invocations write into
/// the pending-result channel; free-text invocations post through the chat
/// transport. Delivery is at-most-once; later writes are dropped.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn deliver(&self, reply: ReplyPayload);
}
