//! Parsing for the fixed platform mention shapes: `<@id>` / `<@!id>` for
//! users, `<#id>` for channels, `<@&id>` for roles.

use crate::snowflake::Snowflake;

/// Extracts a user id from `<@id>` or `<@!id>` markup.
pub fn parse_user_mention(token: &str) -> Option<Snowflake> {
    let inner = token.strip_prefix("<@")?.strip_suffix('>')?;
    // `<@&...>` is role markup, not a nickname mention.
    if inner.starts_with('&') {
        return None;
    }
    let digits = inner.strip_prefix('!').unwrap_or(inner);
    parse_id(digits)
}

/// Extracts a channel id from `<#id>` markup.
pub fn parse_channel_mention(token: &str) -> Option<Snowflake> {
    let digits = token.strip_prefix("<#")?.strip_suffix('>')?;
    parse_id(digits)
}

/// Extracts a role id from `<@&id>` markup.
pub fn parse_role_mention(token: &str) -> Option<Snowflake> {
    let digits = token.strip_prefix("<@&")?.strip_suffix('>')?;
    parse_id(digits)
}

fn parse_id(digits: &str) -> Option<Snowflake> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u64>().ok().map(Snowflake)
}
