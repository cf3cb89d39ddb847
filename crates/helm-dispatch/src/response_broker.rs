//! The deferred-response protocol: races the handler's pending result
//! against the platform's two reply deadlines.
//!
//! `Pending -> {Immediate, Deferred} -> {FollowedUp, Abandoned}`. Exactly one
//! synchronous reply is produced per invocation and at most one follow-up.
//! Neither deadline cancels the handler; an abandoned handler is merely
//! disconnected from any further response path.

use std::sync::Arc;
use std::time::Duration;

use helm_command::ReplyPayload;
use tokio::sync::{oneshot, watch};
use tracing::warn;

use crate::collaborators::{ErrorContext, ErrorReporter, InteractionEditor};

/// Wall-clock reply deadlines. Fixed per process, never per command.
#[derive(Debug, Clone, Copy)]
pub struct BrokerConfig {
    /// Window for an immediate synchronous reply.
    pub first_deadline: Duration,
    /// Window for the follow-up after a deferred acknowledgement.
    pub follow_up_deadline: Duration,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            first_deadline: Duration::from_millis(1500),
            follow_up_deadline: Duration::from_millis(15_000),
        }
    }
}

/// Broker protocol state. Observable through the watch handle returned by
/// [`ResponseBroker::drive`]; `FollowedUp` and `Abandoned` are terminal, and
/// `Immediate` is terminal as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrokerState {
    Pending,
    Immediate,
    Deferred,
    FollowedUp,
    Abandoned,
}

impl BrokerState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Immediate | Self::FollowedUp | Self::Abandoned)
    }
}

/// The one synchronous reply owed to the platform for this invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitialResponse {
    Immediate(ReplyPayload),
    Deferred { ephemeral: bool },
}

pub struct ResponseBroker {
    config: BrokerConfig,
    editor: Arc<dyn InteractionEditor>,
    errors: Arc<dyn ErrorReporter>,
}

impl ResponseBroker {
    pub fn new(
        config: BrokerConfig,
        editor: Arc<dyn InteractionEditor>,
        errors: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            config,
            editor,
            errors,
        }
    }

    /// Races the pending result against the first deadline. Returns the
    /// synchronous reply decision plus a state handle; when the decision is
    /// `Deferred`, a spawned task keeps waiting on the same pending result
    /// for the follow-up window and delivers through the interaction editor.
    pub async fn drive(
        &self,
        rx: oneshot::Receiver<ReplyPayload>,
        token: String,
        ephemeral_default: bool,
        error_ctx: ErrorContext,
    ) -> (InitialResponse, watch::Receiver<BrokerState>) {
        let started = tokio::time::Instant::now();
        let (state_tx, state_rx) = watch::channel(BrokerState::Pending);

        // A dropped sender (handler panicked or never replied) must not
        // short-circuit the protocol; it reads as a result that never comes.
        let mut result = Box::pin(async move {
            match rx.await {
                Ok(reply) => reply,
                Err(_) => std::future::pending().await,
            }
        });

        tokio::select! {
            reply = &mut result => {
                let _ = state_tx.send(BrokerState::Immediate);
                (InitialResponse::Immediate(reply), state_rx)
            }
            _ = tokio::time::sleep(self.config.first_deadline) => {
                let _ = state_tx.send(BrokerState::Deferred);

                let editor = self.editor.clone();
                let errors = self.errors.clone();
                // Both deadlines are measured from invocation start, not from
                // the deferral; the follow-up window is whatever remains.
                let follow_up_at = started + self.config.follow_up_deadline;
                tokio::spawn(async move {
                    match tokio::time::timeout_at(follow_up_at, &mut result).await {
                        Ok(reply) => {
                            if let Err(error) = editor.edit_original(&token, &reply).await {
                                // No retry; the acknowledgement already sent
                                // stands as the final observable state.
                                errors.report(&error, error_ctx);
                            }
                            let _ = state_tx.send(BrokerState::FollowedUp);
                        }
                        Err(_) => {
                            let _ = state_tx.send(BrokerState::Abandoned);
                        }
                    }
                });

                (
                    InitialResponse::Deferred {
                        ephemeral: ephemeral_default,
                    },
                    state_rx,
                )
            }
        }
    }

    /// Modal submissions have no defer branch: the handler is awaited to
    /// completion. A dropped sender yields no response and is logged.
    pub async fn await_modal(&self, rx: oneshot::Receiver<ReplyPayload>) -> Option<ReplyPayload> {
        match rx.await {
            Ok(reply) => Some(reply),
            Err(_) => {
                warn!("modal submission produced no response");
                None
            }
        }
    }
}
