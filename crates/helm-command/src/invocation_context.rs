use std::sync::Arc;

use helm_core::{PermissionTier, PremiumTier, Snowflake};

use crate::reply::{ReplyPayload, ReplySink};

/// Per-invocation execution context handed to handlers: caller identity,
/// location, resolved eligibility tiers, and the reply sink. Created per
/// invocation and discarded once a response has been sent or abandoned.
#[derive(Clone)]
pub struct InvocationContext {
    pub caller: Snowflake,
    pub guild_id: Snowflake,
    pub channel_id: Snowflake,
    pub permission_tier: PermissionTier,
    pub premium_tier: PremiumTier,
    sink: Arc<dyn ReplySink>,
}

impl InvocationContext {
    pub fn new(
        caller: Snowflake,
        guild_id: Snowflake,
        channel_id: Snowflake,
        permission_tier: PermissionTier,
        premium_tier: PremiumTier,
        sink: Arc<dyn ReplySink>,
    ) -> Self {
        Self {
            caller,
            guild_id,
            channel_id,
            permission_tier,
            premium_tier,
            sink,
        }
    }

    /// Sends the invocation's reply. At most one reply reaches the caller;
    /// the sink drops any further writes.
    pub async fn reply(&self, payload: ReplyPayload) {
        self.sink.deliver(payload).await;
    }
}

impl std::fmt::Debug for InvocationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvocationContext")
            .field("caller", &self.caller)
            .field("guild_id", &self.guild_id)
            .field("channel_id", &self.channel_id)
            .field("permission_tier", &self.permission_tier)
            .field("premium_tier", &self.premium_tier)
            .finish()
    }
}
