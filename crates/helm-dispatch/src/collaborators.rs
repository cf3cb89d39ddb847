//! Seams to the systems this engine consumes but does not implement: the
//! permission and premium stores, privileged-user directory, operator error
//! reporting, interaction follow-up delivery, usage metrics, and the chat
//! transport for free-text surfaces.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use helm_command::ReplyPayload;
use helm_core::{PermissionTier, PremiumTier, Snowflake};

/// Structured context attached to operator-visible failure reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorContext {
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
    pub channel_id: Snowflake,
}

#[async_trait]
pub trait PermissionLookup: Send + Sync {
    async fn permission_tier(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> Result<PermissionTier>;
}

#[async_trait]
pub trait PremiumLookup: Send + Sync {
    async fn premium_tier(&self, guild_id: Snowflake) -> Result<PremiumTier>;
}

/// Externally supplied privileged-user sets plus the guild/user blacklist.
#[async_trait]
pub trait PrivilegedUserDirectory: Send + Sync {
    fn is_admin(&self, user_id: Snowflake) -> bool;
    fn is_helper(&self, user_id: Snowflake) -> bool;
    async fn is_blacklisted(&self, guild_id: Snowflake, user_id: Snowflake) -> Result<bool>;
}

/// Operator-visible error sink. End users never see these reports.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &anyhow::Error, ctx: ErrorContext);
}

/// Edits the original interaction response, keyed by the invocation token.
/// Used for follow-up delivery after a deferred acknowledgement.
#[async_trait]
pub trait InteractionEditor: Send + Sync {
    async fn edit_original(&self, token: &str, payload: &ReplyPayload) -> Result<()>;
}

pub trait UsageMetrics: Send + Sync {
    fn increment_command(&self, command_name: &str);
}

/// Outbound chat operations used by the free-text path.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_message(&self, channel_id: Snowflake, payload: &ReplyPayload) -> Result<()>;
    /// Cross reaction marking a silently rejected invocation.
    async fn react_cross(&self, channel_id: Snowflake, message_id: Snowflake) -> Result<()>;
    async fn delete_message(&self, channel_id: Snowflake, message_id: Snowflake) -> Result<()>;
}

/// Bundle of collaborator handles threaded through the pipeline.
#[derive(Clone)]
pub struct Collaborators {
    pub permissions: Arc<dyn PermissionLookup>,
    pub premium: Arc<dyn PremiumLookup>,
    pub directory: Arc<dyn PrivilegedUserDirectory>,
    pub errors: Arc<dyn ErrorReporter>,
    pub editor: Arc<dyn InteractionEditor>,
    pub metrics: Arc<dyn UsageMetrics>,
    pub chat: Arc<dyn ChatTransport>,
}
