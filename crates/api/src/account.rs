//! Account-service client used when the `mk8_token` cookie is missing or stale.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::http::{StatusCode, header};
use chrono::Utc;
use serde::Deserialize;

use mk8gate_auth::{
    AccessLevel, AccountCredentials, AccountVerifier, IdentityToken, Pid, ResolveError, TokenSigner,
    VerifiedAccount,
};

/// `GET /v1/user` response body (fields the gate needs; the rest is ignored).
#[derive(Debug, Clone, Deserialize)]
pub struct AccountProfile {
    pub pid: u32,
    pub username: String,
    pub access_level: i32,
    pub server_access_level: String,
    pub mii: MiiProfile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MiiProfile {
    pub image_url: String,
}

impl From<AccountProfile> for IdentityToken {
    fn from(profile: AccountProfile) -> Self {
        IdentityToken {
            pid: Pid::new(profile.pid),
            pnid: profile.username,
            access_level: AccessLevel::new(profile.access_level),
            server_access_level: profile.server_access_level,
            mii_image_url: profile.mii.image_url,
        }
    }
}

/// Verifies browser credentials against the account API and mints a fresh `mk8_token`.
pub struct HttpAccountVerifier {
    client: reqwest::Client,
    user_url: String,
    signer: Arc<dyn TokenSigner>,
}

impl HttpAccountVerifier {
    pub fn new(base_url: &str, timeout: Duration, signer: Arc<dyn TokenSigner>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            user_url: format!("{}/v1/user", base_url.trim_end_matches('/')),
            signer,
        })
    }
}

#[async_trait]
impl AccountVerifier for HttpAccountVerifier {
    async fn verify(&self, credentials: &AccountCredentials) -> Result<VerifiedAccount, ResolveError> {
        let res = self
            .client
            .get(&self.user_url)
            .header(header::AUTHORIZATION, credentials.authorization())
            .send()
            .await
            .map_err(|e| ResolveError::remote(e.to_string()))?;

        match res.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::debug!(status = %res.status(), "account api rejected credentials");
                return Err(ResolveError::TokenUnavailable);
            }
            status => return Err(ResolveError::remote(format!("account api returned {status}"))),
        }

        let profile: AccountProfile = res
            .json()
            .await
            .map_err(|e| ResolveError::remote(format!("invalid account profile: {e}")))?;

        let token = IdentityToken::from(profile);
        let signed_token = self
            .signer
            .sign(&token, Utc::now())
            .map_err(|e| ResolveError::remote(e.to_string()))?;

        tracing::debug!(pid = %token.pid, "identity verified by account api");
        Ok(VerifiedAccount { token, signed_token })
    }
}
