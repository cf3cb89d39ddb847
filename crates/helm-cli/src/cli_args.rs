use clap::Parser;

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Parser)]
#[command(name = "helm", about = "Chat command front end and dispatch engine", version)]
pub struct Cli {
    #[arg(
        long,
        env = "HELM_BIND",
        default_value = "127.0.0.1:3000",
        help = "Address the ingestion server binds to"
    )]
    pub bind: String,

    #[arg(
        long,
        env = "HELM_PREFIX",
        default_value = "t!",
        help = "Free-text invocation prefix; the bot mention always works"
    )]
    pub prefix: String,

    #[arg(
        long = "delete-after-secs",
        env = "HELM_DELETE_AFTER_SECS",
        default_value = "10",
        value_parser = parse_positive_u64,
        help = "Seconds before a triggering free-text message is deleted"
    )]
    pub delete_after_secs: u64,

    #[arg(long, env = "HELM_BOT_TOKEN", help = "Bot token for outbound REST calls")]
    pub bot_token: String,

    #[arg(
        long = "application-id",
        env = "HELM_APPLICATION_ID",
        help = "Application id used for interaction follow-up edits"
    )]
    pub application_id: u64,

    #[arg(
        long = "api-base",
        env = "HELM_API_BASE",
        default_value = "https://discord.com/api/v10",
        help = "Base URL of the platform REST API"
    )]
    pub api_base: String,

    #[arg(
        long = "admin-id",
        env = "HELM_ADMIN_IDS",
        value_delimiter = ',',
        help = "User ids granted the bot-administrator override"
    )]
    pub admin_ids: Vec<u64>,

    #[arg(
        long = "helper-id",
        env = "HELM_HELPER_IDS",
        value_delimiter = ',',
        help = "User ids granted the bot-helper override"
    )]
    pub helper_ids: Vec<u64>,

    #[arg(
        long = "assume-premium",
        env = "HELM_ASSUME_PREMIUM",
        help = "Treat every guild as premium-entitled (development only)"
    )]
    pub assume_premium: bool,
}
