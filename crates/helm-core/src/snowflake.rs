use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Numeric platform identifier for users, guilds, channels, roles and
/// messages. Serialized as a bare integer on the wire.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Snowflake(pub u64);

impl Snowflake {
    pub fn value(self) -> u64 {
        self.0
    }

    /// Zero marks "no guild" on direct-message events.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for Snowflake {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl FromStr for Snowflake {
    type Err = std::num::ParseIntError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        raw.parse::<u64>().map(Self)
    }
}
