//! Reply sink implementations: the single-slot pending-result channel for
//! interaction invocations and the chat-transport sink for free-text ones.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use helm_command::{ReplyPayload, ReplySink};
use helm_core::Snowflake;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::collaborators::{ChatTransport, ErrorContext, ErrorReporter};

/// Creates the per-invocation result channel: a take-once sender wrapped as
/// a reply sink, and the receiver the response broker waits on. Written at
/// most once; the broker abandons the invocation if it is never written.
pub fn pending_result() -> (Arc<PendingResultSink>, oneshot::Receiver<ReplyPayload>) {
    let (tx, rx) = oneshot::channel();
    (
        Arc::new(PendingResultSink {
            tx: Mutex::new(Some(tx)),
        }),
        rx,
    )
}

/// Single-writer side of the pending-result channel.
pub struct PendingResultSink {
    tx: Mutex<Option<oneshot::Sender<ReplyPayload>>>,
}

#[async_trait]
impl ReplySink for PendingResultSink {
    async fn deliver(&self, reply: ReplyPayload) {
        let sender = match self.tx.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };
        match sender {
            Some(sender) => {
                if sender.send(reply).is_err() {
                    // Broker already abandoned this invocation.
                    debug!("pending result discarded after abandonment");
                }
            }
            None => warn!("duplicate reply dropped; pending result is single-write"),
        }
    }
}

/// Sink for free-text invocations: replies post straight to the channel the
/// command was issued in. Transport failures are operator-visible only.
pub struct ChannelReplySink {
    chat: Arc<dyn ChatTransport>,
    errors: Arc<dyn ErrorReporter>,
    error_ctx: ErrorContext,
    channel_id: Snowflake,
}

impl ChannelReplySink {
    pub fn new(
        chat: Arc<dyn ChatTransport>,
        errors: Arc<dyn ErrorReporter>,
        error_ctx: ErrorContext,
        channel_id: Snowflake,
    ) -> Self {
        Self {
            chat,
            errors,
            error_ctx,
            channel_id,
        }
    }
}

#[async_trait]
impl ReplySink for ChannelReplySink {
    async fn deliver(&self, reply: ReplyPayload) {
        if let Err(error) = self.chat.send_message(self.channel_id, &reply).await {
            self.errors.report(&error, self.error_ctx);
        }
    }
}
