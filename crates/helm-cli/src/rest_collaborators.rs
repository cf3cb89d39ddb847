//! REST-backed collaborator implementations: outbound chat operations and
//! interaction follow-up edits against the platform API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use helm_command::ReplyPayload;
use helm_core::Snowflake;
use helm_dispatch::{ChatTransport, InteractionEditor};
use serde_json::json;

// URL-encoded cross-mark emoji.
const CROSS_REACTION: &str = "%E2%9D%8C";

#[derive(Clone)]
pub(crate) struct RestClient {
    http: reqwest::Client,
    api_base: String,
    bot_token: String,
    application_id: u64,
}

impl RestClient {
    pub(crate) fn new(api_base: String, bot_token: String, application_id: u64) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            bot_token,
            application_id,
        }
    }

    fn auth(&self) -> String {
        format!("Bot {}", self.bot_token)
    }
}

#[async_trait]
impl ChatTransport for RestClient {
    async fn send_message(&self, channel_id: Snowflake, payload: &ReplyPayload) -> Result<()> {
        self.http
            .post(format!("{}/channels/{channel_id}/messages", self.api_base))
            .header("Authorization", self.auth())
            .json(&json!({"content": payload.content}))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .with_context(|| format!("failed to send message to channel {channel_id}"))?;
        Ok(())
    }

    async fn react_cross(&self, channel_id: Snowflake, message_id: Snowflake) -> Result<()> {
        self.http
            .put(format!(
                "{}/channels/{channel_id}/messages/{message_id}/reactions/{CROSS_REACTION}/@me",
                self.api_base
            ))
            .header("Authorization", self.auth())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .with_context(|| format!("failed to react to message {message_id}"))?;
        Ok(())
    }

    async fn delete_message(&self, channel_id: Snowflake, message_id: Snowflake) -> Result<()> {
        self.http
            .delete(format!(
                "{}/channels/{channel_id}/messages/{message_id}",
                self.api_base
            ))
            .header("Authorization", self.auth())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .with_context(|| format!("failed to delete message {message_id}"))?;
        Ok(())
    }
}

#[async_trait]
impl InteractionEditor for RestClient {
    async fn edit_original(&self, token: &str, payload: &ReplyPayload) -> Result<()> {
        self.http
            .patch(format!(
                "{}/webhooks/{}/{token}/messages/@original",
                self.api_base, self.application_id
            ))
            .json(&json!({"content": payload.content}))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .context("failed to edit original interaction response")?;
        Ok(())
    }
}
