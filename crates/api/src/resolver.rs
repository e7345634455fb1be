use std::sync::Arc;

use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Utc};

use mk8gate_auth::{AccountCredentials, AccountVerifier, ResolveError, TokenDecoder};

use crate::gate::Resolution;
use crate::gate::decision::{ACCESS_TOKEN_COOKIE, MK8_TOKEN_COOKIE, TOKEN_TYPE_COOKIE};

/// Resolves a request's identity: `mk8_token` cookie first, account service second.
#[derive(Clone)]
pub struct TokenResolver {
    decoder: Arc<dyn TokenDecoder>,
    verifier: Arc<dyn AccountVerifier>,
}

impl TokenResolver {
    pub fn new(decoder: Arc<dyn TokenDecoder>, verifier: Arc<dyn AccountVerifier>) -> Self {
        Self { decoder, verifier }
    }

    pub async fn resolve(&self, jar: &CookieJar, now: DateTime<Utc>) -> Result<Resolution, ResolveError> {
        if let Some(cookie) = jar.get(MK8_TOKEN_COOKIE) {
            match self.decoder.decode(cookie.value(), now) {
                Ok(token) => return Ok(Resolution::Cookie(token)),
                Err(e) => tracing::debug!(error = %e, "mk8_token cookie rejected"),
            }
        }

        let credentials = account_credentials(jar).ok_or(ResolveError::TokenUnavailable)?;
        let account = self.verifier.verify(&credentials).await?;
        Ok(Resolution::Minted(account))
    }
}

fn account_credentials(jar: &CookieJar) -> Option<AccountCredentials> {
    let access_token = jar
        .get(ACCESS_TOKEN_COOKIE)
        .map(|c| c.value().trim())
        .filter(|v| !v.is_empty())?;
    let token_type = jar.get(TOKEN_TYPE_COOKIE).map(|c| c.value());

    Some(AccountCredentials::new(access_token, token_type))
}
