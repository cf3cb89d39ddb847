//! Command-tree resolution: walks raw input against the registry to find the
//! deepest matching command plus the unconsumed argument material.

use helm_command::{CommandDefinition, CommandRegistry};

use crate::invocation_types::CommandOption;

/// Outcome of resolving a free-text token sequence.
#[derive(Debug)]
pub struct FreeTextResolution<'a> {
    pub command: &'a CommandDefinition,
    /// Top-level ancestor; some gates (interaction-only) consult it.
    pub root: &'a CommandDefinition,
    /// Tokens left over after the name/subcommand walk, in input order.
    pub remaining: &'a [String],
}

/// Resolves free-text tokens: the first token matches a top-level command's
/// name or alias case-insensitively (first match wins), then the walk
/// descends while the next token matches a child. `None` means the input is
/// ordinary chat and is silently dropped by the caller.
pub fn resolve_free_text<'a>(
    registry: &'a CommandRegistry,
    tokens: &'a [String],
) -> Option<FreeTextResolution<'a>> {
    let (first, rest) = tokens.split_first()?;
    let root = registry.find_top_level(first)?;

    let mut command = root;
    let mut consumed = 0;
    while let Some(token) = rest.get(consumed) {
        match command.children.iter().find(|child| child.matches(token)) {
            Some(child) => {
                command = child;
                consumed += 1;
            }
            None => break,
        }
    }

    Some(FreeTextResolution {
        command,
        root,
        remaining: &rest[consumed..],
    })
}

/// Outcome of resolving a structured option path.
#[derive(Debug)]
pub struct InteractionResolution<'a> {
    pub command: &'a CommandDefinition,
    pub root: &'a CommandDefinition,
    /// The leaf's typed option list, ready for positional re-mapping.
    pub options: &'a [CommandOption],
}

/// Resolves an interaction's command name and subcommand option path. The
/// platform only dispatches registered commands, so a `None` here indicates
/// a registration drift worth logging, not a user mistake.
pub fn resolve_interaction_path<'a>(
    registry: &'a CommandRegistry,
    name: &str,
    options: &'a [CommandOption],
) -> Option<InteractionResolution<'a>> {
    let root = registry.find_top_level(name)?;

    let mut command = root;
    let mut current = options;
    // A node without a value is a subcommand descent; stop at the first
    // segment that matches no child.
    while let Some(first) = current.first() {
        if !first.is_subcommand() {
            break;
        }
        match command
            .children
            .iter()
            .find(|child| child.matches(&first.name))
        {
            Some(child) => {
                command = child;
                current = &first.options;
            }
            None => break,
        }
    }

    Some(InteractionResolution {
        command,
        root,
        options: current,
    })
}
