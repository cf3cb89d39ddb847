//! Commands this binary registers on its own. Deployments are expected to
//! extend the registry; these exist so a bare install answers something.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use helm_command::{
    ArgumentKind, ArgumentSpec, CommandCategory, CommandDefinition, CommandHandler,
    CommandRegistry, InvocationContext, ParsedArgumentSet, RegistryError, ReplyPayload,
};

struct PingHandler;

#[async_trait]
impl CommandHandler for PingHandler {
    fn parameter_kinds(&self) -> &[ArgumentKind] {
        &[]
    }

    async fn execute(&self, ctx: InvocationContext, _args: ParsedArgumentSet) -> Result<()> {
        ctx.reply(ReplyPayload::text("Pong!")).await;
        Ok(())
    }
}

struct AboutHandler;

#[async_trait]
impl CommandHandler for AboutHandler {
    fn parameter_kinds(&self) -> &[ArgumentKind] {
        &[]
    }

    async fn execute(&self, ctx: InvocationContext, _args: ParsedArgumentSet) -> Result<()> {
        ctx.reply(ReplyPayload::text(format!(
            "helm {} - command front end",
            env!("CARGO_PKG_VERSION")
        )))
        .await;
        Ok(())
    }
}

struct EchoHandler;

#[async_trait]
impl CommandHandler for EchoHandler {
    fn parameter_kinds(&self) -> &[ArgumentKind] {
        std::slice::from_ref(&ArgumentKind::String)
    }

    async fn execute(&self, ctx: InvocationContext, args: ParsedArgumentSet) -> Result<()> {
        if let Some(text) = args.string(0) {
            ctx.reply(ReplyPayload::text(text.to_string())).await;
        }
        Ok(())
    }
}

pub(crate) fn build_registry() -> Result<CommandRegistry, RegistryError> {
    CommandRegistry::build(vec![
        CommandDefinition::new("ping", CommandCategory::General, Arc::new(PingHandler)),
        CommandDefinition::new("about", CommandCategory::General, Arc::new(AboutHandler))
            .with_aliases(&["info"]),
        CommandDefinition::new("echo", CommandCategory::General, Arc::new(EchoHandler))
            .with_arguments(vec![ArgumentSpec::new("text", ArgumentKind::String, true)])
            .default_ephemeral(),
    ])
}

#[cfg(test)]
mod tests {
    use super::build_registry;

    #[test]
    fn unit_builtin_registry_builds_and_resolves_aliases() {
        let registry = build_registry().expect("registry");
        assert!(registry.find_top_level("ping").is_some());
        assert_eq!(
            registry.find_top_level("INFO").expect("alias").name,
            "about"
        );
    }
}
