//! Ordered, short-circuiting eligibility gates. Facts are fetched from the
//! external stores concurrently before any gate runs; a failed lookup aborts
//! the invocation with no user-visible response.

use helm_command::{CommandDefinition, MessageId};
use helm_core::{PermissionTier, PremiumTier, Snowflake};

use crate::collaborators::{Collaborators, ErrorContext};

/// How the invocation arrived; the interaction-only gate applies to the
/// free-text path only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationSource {
    FreeText,
    Interaction,
}

/// Facts resolved for an authorized invocation, carried into the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizedFacts {
    pub permission_tier: PermissionTier,
    pub premium_tier: PremiumTier,
}

/// Why an invocation was not authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationFailure {
    /// Gate failed; the caller gets the named rejection message.
    Rejected(MessageId),
    /// Blacklisted caller; dropped silently (cross reaction on free text).
    Blacklisted,
    /// A fact lookup failed; already reported, no response is sent.
    LookupFailed,
}

use crate::invocation_types::SurfaceKind;

pub async fn authorize(
    collaborators: &Collaborators,
    command: &CommandDefinition,
    root: &CommandDefinition,
    surface: SurfaceKind,
    source: InvocationSource,
    guild_id: Snowflake,
    caller: Snowflake,
    error_ctx: ErrorContext,
) -> Result<AuthorizedFacts, AuthorizationFailure> {
    let (permission, premium, blacklisted) = tokio::join!(
        collaborators.permissions.permission_tier(guild_id, caller),
        collaborators.premium.premium_tier(guild_id),
        collaborators.directory.is_blacklisted(guild_id, caller),
    );

    let permission_tier = report_lookup(collaborators, permission, error_ctx)?;
    let premium_tier = report_lookup(collaborators, premium, error_ctx)?;
    let blacklisted = report_lookup(collaborators, blacklisted, error_ctx)?;

    if blacklisted {
        return Err(AuthorizationFailure::Blacklisted);
    }

    if command.main_surface_only && surface == SurfaceKind::Whitelabel {
        return Err(AuthorizationFailure::Rejected(MessageId::MainSurfaceOnly));
    }

    if source == InvocationSource::FreeText
        && (command.interaction_only || root.interaction_only)
    {
        return Err(AuthorizationFailure::Rejected(MessageId::InteractionOnly));
    }

    if permission_tier < command.permission_tier {
        return Err(AuthorizationFailure::Rejected(MessageId::NoPermission));
    }

    if command.admin_only && !collaborators.directory.is_admin(caller) {
        return Err(AuthorizationFailure::Rejected(MessageId::AdminOnly));
    }

    if command.helper_only && !collaborators.directory.is_helper(caller) {
        return Err(AuthorizationFailure::Rejected(MessageId::HelperOnly));
    }

    if command.premium_only && premium_tier == PremiumTier::None {
        return Err(AuthorizationFailure::Rejected(MessageId::PremiumOnly));
    }

    Ok(AuthorizedFacts {
        permission_tier,
        premium_tier,
    })
}

fn report_lookup<T>(
    collaborators: &Collaborators,
    result: anyhow::Result<T>,
    error_ctx: ErrorContext,
) -> Result<T, AuthorizationFailure> {
    result.map_err(|error| {
        collaborators.errors.report(&error, error_ctx);
        AuthorizationFailure::LookupFailed
    })
}
