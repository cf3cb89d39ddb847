//! Foundational leaf types shared across Helm crates.
//!
//! Provides platform snowflake identifiers, caller eligibility tiers, and
//! mention-markup parsing used by argument coercion.

pub mod mention_markup;
pub mod snowflake;
pub mod tiers;

pub use mention_markup::{parse_channel_mention, parse_role_mention, parse_user_mention};
pub use snowflake::Snowflake;
pub use tiers::{PermissionTier, PremiumTier};
