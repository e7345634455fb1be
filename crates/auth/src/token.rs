use serde::{Deserialize, Serialize};

use crate::{AccessLevel, Pid};

/// Identity asserted by a signed `mk8_token`.
///
/// Built fresh for every request (from the cookie or from the account
/// service) and dropped once the response is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityToken {
    /// Principal id.
    pub pid: Pid,

    /// Username (Pretendo Network ID).
    pub pnid: String,

    /// Account access level; gates `/admin`.
    pub access_level: AccessLevel,

    /// Game-server access level. Opaque; echoed back to callers.
    pub server_access_level: String,

    /// Rendered Mii image for the account.
    pub mii_image_url: String,
}

impl IdentityToken {
    pub fn is_admin(&self) -> bool {
        self.access_level.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(level: i32) -> IdentityToken {
        IdentityToken {
            pid: Pid::new(42),
            pnid: "alice".to_string(),
            access_level: AccessLevel::new(level),
            server_access_level: "test".to_string(),
            mii_image_url: "http://x/y.png".to_string(),
        }
    }

    #[test]
    fn admin_follows_access_level() {
        assert!(!token(0).is_admin());
        assert!(token(3).is_admin());
    }

    #[test]
    fn json_shape_uses_plain_fields() {
        let value = serde_json::to_value(token(3)).unwrap();
        assert_eq!(value["pid"], 42);
        assert_eq!(value["pnid"], "alice");
        assert_eq!(value["access_level"], 3);
        assert_eq!(value["server_access_level"], "test");
        assert_eq!(value["mii_image_url"], "http://x/y.png");
    }
}
