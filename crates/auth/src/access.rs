use serde::{Deserialize, Serialize};

/// Account access level as reported by the account service.
///
/// Levels are plain integers; the only rule encoded at this layer is the
/// admin threshold.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessLevel(i32);

impl AccessLevel {
    /// Minimum level granting access to `/admin` routes.
    pub const ADMIN: AccessLevel = AccessLevel(3);

    pub fn new(level: i32) -> Self {
        Self(level)
    }

    pub fn get(&self) -> i32 {
        self.0
    }

    pub fn is_admin(&self) -> bool {
        *self >= Self::ADMIN
    }
}

impl core::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i32> for AccessLevel {
    fn from(value: i32) -> Self {
        Self(value)
    }
}
