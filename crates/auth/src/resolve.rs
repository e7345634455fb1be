//! Token resolution contract: local cookie decode first, account service second.

use async_trait::async_trait;
use thiserror::Error;

use crate::IdentityToken;

/// Why no identity could be resolved for a request.
///
/// Neither variant is surfaced to clients; both mean "anonymous".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no identity token available")]
    TokenUnavailable,

    #[error("remote account verification failed: {0}")]
    RemoteVerificationFailure(String),
}

impl ResolveError {
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::RemoteVerificationFailure(msg.into())
    }
}

/// OAuth-style credentials the browser holds for the account service.
#[derive(Clone, PartialEq, Eq)]
pub struct AccountCredentials {
    pub access_token: String,
    pub token_type: String,
}

impl AccountCredentials {
    pub const DEFAULT_TOKEN_TYPE: &'static str = "Bearer";

    /// `token_type` falls back to `Bearer` when absent or blank.
    pub fn new(access_token: impl Into<String>, token_type: Option<&str>) -> Self {
        let token_type = token_type
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(Self::DEFAULT_TOKEN_TYPE);

        Self {
            access_token: access_token.into(),
            token_type: token_type.to_string(),
        }
    }

    /// Value for the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

impl core::fmt::Debug for AccountCredentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AccountCredentials")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Identity confirmed by the account service plus a freshly signed token for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedAccount {
    pub token: IdentityToken,
    pub signed_token: String,
}

/// Remote account verification. Performs network IO.
#[async_trait]
pub trait AccountVerifier: Send + Sync {
    async fn verify(&self, credentials: &AccountCredentials) -> Result<VerifiedAccount, ResolveError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_type_defaults_to_bearer() {
        assert_eq!(AccountCredentials::new("abc", None).authorization(), "Bearer abc");
        assert_eq!(AccountCredentials::new("abc", Some("  ")).authorization(), "Bearer abc");
    }

    #[test]
    fn token_type_is_kept_when_present() {
        assert_eq!(AccountCredentials::new("abc", Some("MAC")).authorization(), "MAC abc");
    }

    #[test]
    fn debug_redacts_access_token() {
        let rendered = format!("{:?}", AccountCredentials::new("s3cr3t", None));
        assert!(!rendered.contains("s3cr3t"));
    }
}
