//! Synchronous suggestion path: locates the focused argument's autocomplete
//! handler and returns its candidate list within the single request cycle.

use helm_command::{AutocompleteChoice, CommandRegistry};
use serde_json::Value;
use tracing::warn;

use crate::collaborators::{Collaborators, ErrorContext};
use crate::command_resolver::resolve_interaction_path;
use crate::invocation_types::{AutocompleteInvocation, CommandOption};

/// Platform cap on suggestion entries per response.
pub const MAX_AUTOCOMPLETE_CHOICES: usize = 25;

/// Routes an autocomplete request to the focused argument's handler.
/// `None` means no response is produced (logged, never replied): unknown
/// command, no focused option, or an argument without a handler.
pub async fn route_autocomplete(
    registry: &CommandRegistry,
    collaborators: &Collaborators,
    invocation: &AutocompleteInvocation,
) -> Option<Vec<AutocompleteChoice>> {
    let resolution = match resolve_interaction_path(
        registry,
        &invocation.data.name,
        &invocation.data.options,
    ) {
        Some(resolution) => resolution,
        None => {
            warn!(command = %invocation.data.name, "autocomplete for unregistered command");
            return None;
        }
    };

    let focused = match find_focused(resolution.options) {
        Some(option) => option,
        None => {
            warn!(command = %invocation.data.name, "autocomplete without a focused option");
            return None;
        }
    };

    let spec = resolution
        .command
        .arguments
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(&focused.name))?;

    let handler = match &spec.autocomplete {
        Some(handler) => handler,
        None => {
            warn!(
                command = %resolution.command.name,
                argument = %spec.name,
                "autocomplete for argument without a handler"
            );
            return None;
        }
    };

    let partial = focused
        .value
        .as_ref()
        .map(partial_text)
        .unwrap_or_default();

    match handler.suggest(invocation.guild_id, &partial).await {
        Ok(mut choices) => {
            choices.truncate(MAX_AUTOCOMPLETE_CHOICES);
            Some(choices)
        }
        Err(error) => {
            collaborators.errors.report(
                &error,
                ErrorContext {
                    guild_id: invocation.guild_id,
                    ..ErrorContext::default()
                },
            );
            None
        }
    }
}

fn find_focused(options: &[CommandOption]) -> Option<&CommandOption> {
    for option in options {
        if option.focused {
            return Some(option);
        }
        if let Some(nested) = find_focused(&option.options) {
            return Some(nested);
        }
    }
    None
}

/// The focused value is usually a string fragment, but numeric arguments
/// arrive as numbers mid-typing.
fn partial_text(value: &Value) -> String {
    match value.as_str() {
        Some(text) => text.to_string(),
        None => value.to_string(),
    }
}
