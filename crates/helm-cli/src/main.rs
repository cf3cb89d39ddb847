mod bootstrap_helpers;
mod builtin_commands;
mod cli_args;
mod rest_collaborators;
mod runtime_collaborators;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use helm_command::{ComponentRegistry, EnglishCatalog};
use helm_dispatch::{BrokerConfig, Collaborators, DispatchEngine, EngineConfig};
use helm_gateway::{run_gateway_server, GatewayConfig};
use tracing::info;

use crate::cli_args::Cli;
use crate::rest_collaborators::RestClient;
use crate::runtime_collaborators::{
    ConfiguredDirectory, CountingMetrics, FixedPremium, OpenPermissions, TracingErrorReporter,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    bootstrap_helpers::init_tracing();

    let rest = Arc::new(RestClient::new(
        cli.api_base.clone(),
        cli.bot_token.clone(),
        cli.application_id,
    ));
    let collaborators = Collaborators {
        permissions: Arc::new(OpenPermissions),
        premium: Arc::new(FixedPremium::new(cli.assume_premium)),
        directory: Arc::new(ConfiguredDirectory::new(&cli.admin_ids, &cli.helper_ids)),
        errors: Arc::new(TracingErrorReporter),
        editor: rest.clone(),
        metrics: Arc::new(CountingMetrics::default()),
        chat: rest,
    };

    let registry = Arc::new(builtin_commands::build_registry().context("invalid command tree")?);
    let components = Arc::new(ComponentRegistry::new());
    let engine = Arc::new(DispatchEngine::new(
        registry,
        components,
        Arc::new(EnglishCatalog),
        collaborators,
        EngineConfig {
            free_text_prefix: cli.prefix.clone(),
            delete_after: Duration::from_secs(cli.delete_after_secs),
            broker: BrokerConfig::default(),
        },
    ));

    info!(prefix = %cli.prefix, bind = %cli.bind, "starting helm");
    run_gateway_server(GatewayConfig { bind: cli.bind }, engine).await
}
