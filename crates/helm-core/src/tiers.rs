use serde::{Deserialize, Serialize};

/// Caller permission tier within a guild, ordered from least to most
/// privileged. Commands declare the minimum tier they require.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PermissionTier {
    #[default]
    Everyone,
    Support,
    Admin,
}

impl PermissionTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Everyone => "everyone",
            Self::Support => "support",
            Self::Admin => "admin",
        }
    }
}

/// Guild entitlement tier. Premium-only commands require anything above
/// `None`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PremiumTier {
    #[default]
    None,
    Premium,
    Whitelabel,
}

impl PremiumTier {
    pub fn is_entitled(self) -> bool {
        self > Self::None
    }
}

#[cfg(test)]
mod tests {
    use super::{PermissionTier, PremiumTier};

    #[test]
    fn unit_permission_tiers_are_ordered() {
        assert!(PermissionTier::Everyone < PermissionTier::Support);
        assert!(PermissionTier::Support < PermissionTier::Admin);
    }

    #[test]
    fn unit_premium_entitlement_excludes_none() {
        assert!(!PremiumTier::None.is_entitled());
        assert!(PremiumTier::Premium.is_entitled());
        assert!(PremiumTier::Whitelabel.is_entitled());
    }

    #[test]
    fn unit_tiers_serialize_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&PermissionTier::Support).expect("encode"),
            "\"support\""
        );
        assert_eq!(
            serde_json::from_str::<PremiumTier>("\"whitelabel\"").expect("decode"),
            PremiumTier::Whitelabel
        );
    }
}
