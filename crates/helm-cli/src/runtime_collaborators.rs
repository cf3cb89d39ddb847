//! In-process collaborator implementations for the stores the engine
//! consumes but this binary does not back with an external service.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use helm_core::{PermissionTier, PremiumTier, Snowflake};
use helm_dispatch::{
    ErrorContext, ErrorReporter, PermissionLookup, PremiumLookup, PrivilegedUserDirectory,
    UsageMetrics,
};
use tracing::{debug, error};

/// Failure reports land in the process log with their invocation context.
pub(crate) struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, report: &anyhow::Error, ctx: ErrorContext) {
        error!(
            guild_id = %ctx.guild_id,
            user_id = %ctx.user_id,
            channel_id = %ctx.channel_id,
            error = %report,
            "invocation failed"
        );
    }
}

/// Per-command usage counters, logged on each increment.
#[derive(Default)]
pub(crate) struct CountingMetrics {
    counts: Mutex<HashMap<String, u64>>,
}

impl UsageMetrics for CountingMetrics {
    fn increment_command(&self, command_name: &str) {
        let mut counts = match self.counts.lock() {
            Ok(counts) => counts,
            Err(poisoned) => poisoned.into_inner(),
        };
        let count = counts.entry(command_name.to_string()).or_insert(0);
        *count += 1;
        debug!(command = command_name, count = *count, "command invoked");
    }
}

/// Fixed admin/helper sets from the command line; nobody is blacklisted.
pub(crate) struct ConfiguredDirectory {
    admins: HashSet<Snowflake>,
    helpers: HashSet<Snowflake>,
}

impl ConfiguredDirectory {
    pub(crate) fn new(admin_ids: &[u64], helper_ids: &[u64]) -> Self {
        Self {
            admins: admin_ids.iter().copied().map(Snowflake).collect(),
            helpers: helper_ids.iter().copied().map(Snowflake).collect(),
        }
    }
}

#[async_trait]
impl PrivilegedUserDirectory for ConfiguredDirectory {
    fn is_admin(&self, user_id: Snowflake) -> bool {
        self.admins.contains(&user_id)
    }

    fn is_helper(&self, user_id: Snowflake) -> bool {
        self.helpers.contains(&user_id)
    }

    async fn is_blacklisted(&self, _guild_id: Snowflake, _user_id: Snowflake) -> Result<bool> {
        Ok(false)
    }
}

/// Guild permission stores live outside this binary; everyone resolves to
/// the base tier here.
pub(crate) struct OpenPermissions;

#[async_trait]
impl PermissionLookup for OpenPermissions {
    async fn permission_tier(
        &self,
        _guild_id: Snowflake,
        _user_id: Snowflake,
    ) -> Result<PermissionTier> {
        Ok(PermissionTier::Everyone)
    }
}

pub(crate) struct FixedPremium {
    tier: PremiumTier,
}

impl FixedPremium {
    pub(crate) fn new(assume_premium: bool) -> Self {
        Self {
            tier: if assume_premium {
                PremiumTier::Premium
            } else {
                PremiumTier::None
            },
        }
    }
}

#[async_trait]
impl PremiumLookup for FixedPremium {
    async fn premium_tier(&self, _guild_id: Snowflake) -> Result<PremiumTier> {
        Ok(self.tier)
    }
}
