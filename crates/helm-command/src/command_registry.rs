use std::collections::HashSet;

use thiserror::Error;

use crate::argument_spec::ArgumentKind;
use crate::command_definition::CommandDefinition;

/// Start-up validation failures. A process with an invalid command forest
/// must not come up at all.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("command '{name}' has an invalid name (must be non-empty, without whitespace)")]
    InvalidName { name: String },
    #[error("duplicate sibling name or alias '{token}' under '{parent}'")]
    DuplicateSibling { parent: String, token: String },
    #[error(
        "command '{command}' declares string argument '{argument}' before the final position; \
         greedy string arguments must come last"
    )]
    StringArgumentNotLast { command: String, argument: String },
    #[error(
        "command '{command}' handler declares {declared} parameter(s) but the command declares \
         {expected} argument(s)"
    )]
    HandlerArityMismatch {
        command: String,
        expected: usize,
        declared: usize,
    },
    #[error(
        "command '{command}' handler parameter {position} is {declared} but argument \
         '{argument}' is {expected}"
    )]
    HandlerKindMismatch {
        command: String,
        position: usize,
        argument: String,
        expected: ArgumentKind,
        declared: ArgumentKind,
    },
}

/// Immutable forest of command definitions. Built once at process start and
/// shared by reference for the process lifetime; there is no run-time
/// mutation path.
#[derive(Debug)]
pub struct CommandRegistry {
    commands: Vec<CommandDefinition>,
}

impl CommandRegistry {
    /// Validates and freezes the command forest. Checks sibling name/alias
    /// uniqueness (case-insensitive), greedy-string placement, and each
    /// handler's declared parameter kinds against its argument specs.
    pub fn build(commands: Vec<CommandDefinition>) -> Result<Self, RegistryError> {
        validate_siblings("<root>", &commands)?;
        for command in &commands {
            validate_command(command)?;
        }
        Ok(Self { commands })
    }

    pub fn commands(&self) -> &[CommandDefinition] {
        &self.commands
    }

    /// First top-level command whose name or alias matches, case-insensitively.
    pub fn find_top_level(&self, token: &str) -> Option<&CommandDefinition> {
        self.commands.iter().find(|command| command.matches(token))
    }
}

fn validate_siblings(parent: &str, siblings: &[CommandDefinition]) -> Result<(), RegistryError> {
    let mut seen: HashSet<String> = HashSet::new();
    for command in siblings {
        for token in std::iter::once(&command.name).chain(command.aliases.iter()) {
            if !seen.insert(token.to_ascii_lowercase()) {
                return Err(RegistryError::DuplicateSibling {
                    parent: parent.to_string(),
                    token: token.clone(),
                });
            }
        }
        validate_siblings(&command.name, &command.children)?;
    }
    Ok(())
}

fn validate_command(command: &CommandDefinition) -> Result<(), RegistryError> {
    if command.name.is_empty() || command.name.chars().any(char::is_whitespace) {
        return Err(RegistryError::InvalidName {
            name: command.name.clone(),
        });
    }

    let last = command.arguments.len().saturating_sub(1);
    for (position, spec) in command.arguments.iter().enumerate() {
        if spec.kind == ArgumentKind::String && spec.free_text_compatible && position != last {
            return Err(RegistryError::StringArgumentNotLast {
                command: command.name.clone(),
                argument: spec.name.clone(),
            });
        }
    }

    let declared = command.handler.parameter_kinds();
    if declared.len() != command.arguments.len() {
        return Err(RegistryError::HandlerArityMismatch {
            command: command.name.clone(),
            expected: command.arguments.len(),
            declared: declared.len(),
        });
    }
    for (position, (spec, kind)) in command.arguments.iter().zip(declared.iter()).enumerate() {
        if spec.kind != *kind {
            return Err(RegistryError::HandlerKindMismatch {
                command: command.name.clone(),
                position,
                argument: spec.name.clone(),
                expected: spec.kind,
                declared: *kind,
            });
        }
    }

    for child in &command.children {
        validate_command(child)?;
    }
    Ok(())
}
