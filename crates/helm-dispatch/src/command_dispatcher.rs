//! Handler dispatch: every authorized invocation runs on its own task so a
//! slow or panicking handler can never stall or poison the ingest path.

use std::sync::Arc;
use std::time::Duration;

use helm_command::{CommandHandler, InvocationContext, ParsedArgumentSet};
use helm_core::Snowflake;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::collaborators::{Collaborators, ErrorContext};

/// Launches the handler bound to its coerced arguments and context, and
/// increments the per-command usage counter. The caller never blocks on
/// completion; handler failures surface only through the error reporter.
pub fn dispatch_handler(
    handler: Arc<dyn CommandHandler>,
    command_name: &str,
    ctx: InvocationContext,
    args: ParsedArgumentSet,
    collaborators: &Collaborators,
    error_ctx: ErrorContext,
) -> JoinHandle<()> {
    collaborators.metrics.increment_command(command_name);

    let errors = collaborators.errors.clone();
    let name = command_name.to_string();
    tokio::spawn(async move {
        debug!(command = %name, "handler dispatched");
        if let Err(error) = handler.execute(ctx, args).await {
            errors.report(&error, error_ctx);
        }
    })
}

/// Schedules best-effort deletion of the triggering free-text message after
/// a fixed delay. Fire-and-forget; delivery failures are operator-visible
/// only.
pub fn schedule_message_deletion(
    collaborators: &Collaborators,
    channel_id: Snowflake,
    message_id: Snowflake,
    delay: Duration,
    error_ctx: ErrorContext,
) -> JoinHandle<()> {
    let chat = collaborators.chat.clone();
    let errors = collaborators.errors.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if let Err(error) = chat.delete_message(channel_id, message_id).await {
            errors.report(&error, error_ctx);
        }
    })
}
