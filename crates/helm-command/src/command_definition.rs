use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use helm_core::PermissionTier;
use serde::{Deserialize, Serialize};

use crate::argument_spec::{ArgumentKind, ArgumentSpec};
use crate::invocation_context::InvocationContext;
use crate::parsed_arguments::ParsedArgumentSet;

/// Grouping label for help output and usage metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandCategory {
    General,
    Tickets,
    Settings,
    Tags,
    Statistics,
}

impl CommandCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Tickets => "tickets",
            Self::Settings => "settings",
            Self::Tags => "tags",
            Self::Statistics => "statistics",
        }
    }
}

/// Typed command executor. Replaces signature reflection: the declared
/// parameter kinds are checked against the command's argument specs once,
/// when the registry is built, never per call.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Positional parameter kinds this handler expects, context excluded.
    /// Must match the command's argument specs exactly.
    fn parameter_kinds(&self) -> &[ArgumentKind];

    async fn execute(&self, ctx: InvocationContext, args: ParsedArgumentSet) -> Result<()>;
}

/// One node of the command forest. Immutable once the registry is built.
#[derive(Clone)]
pub struct CommandDefinition {
    pub name: String,
    pub aliases: Vec<String>,
    pub category: CommandCategory,
    pub arguments: Vec<ArgumentSpec>,
    pub permission_tier: PermissionTier,
    pub admin_only: bool,
    pub helper_only: bool,
    pub premium_only: bool,
    pub interaction_only: bool,
    pub main_surface_only: bool,
    /// Deferred acknowledgements for this command are flagged ephemeral.
    pub default_ephemeral: bool,
    pub children: Vec<CommandDefinition>,
    pub handler: Arc<dyn CommandHandler>,
}

impl CommandDefinition {
    pub fn new(
        name: impl Into<String>,
        category: CommandCategory,
        handler: Arc<dyn CommandHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            category,
            arguments: Vec::new(),
            permission_tier: PermissionTier::Everyone,
            admin_only: false,
            helper_only: false,
            premium_only: false,
            interaction_only: false,
            main_surface_only: false,
            default_ephemeral: false,
            children: Vec::new(),
            handler,
        }
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_arguments(mut self, arguments: Vec<ArgumentSpec>) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn with_children(mut self, children: Vec<CommandDefinition>) -> Self {
        self.children = children;
        self
    }

    pub fn permission_tier(mut self, tier: PermissionTier) -> Self {
        self.permission_tier = tier;
        self
    }

    pub fn admin_only(mut self) -> Self {
        self.admin_only = true;
        self
    }

    pub fn helper_only(mut self) -> Self {
        self.helper_only = true;
        self
    }

    pub fn premium_only(mut self) -> Self {
        self.premium_only = true;
        self
    }

    pub fn interaction_only(mut self) -> Self {
        self.interaction_only = true;
        self
    }

    pub fn main_surface_only(mut self) -> Self {
        self.main_surface_only = true;
        self
    }

    pub fn default_ephemeral(mut self) -> Self {
        self.default_ephemeral = true;
        self
    }

    /// Case-insensitive match against this command's name or any alias.
    pub fn matches(&self, token: &str) -> bool {
        self.name.eq_ignore_ascii_case(token)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(token))
    }
}

impl fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("category", &self.category)
            .field("arguments", &self.arguments)
            .field("permission_tier", &self.permission_tier)
            .field("children", &self.children)
            .finish()
    }
}
