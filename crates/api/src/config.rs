//! Process configuration, read from environment variables.

use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_ACCOUNT_API_URL: &str = "https://api.pretendo.cc";
const DEV_JWT_SECRET: &str = "dev-secret";
const DEFAULT_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;
const DEFAULT_ACCOUNT_API_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone)]
pub struct GateConfig {
    pub listen_addr: SocketAddr,
    /// HS256 secret for `mk8_token`.
    pub jwt_secret: String,
    /// Lifetime of tokens minted after account verification.
    pub token_ttl: chrono::Duration,
    pub account_api_url: String,
    pub account_api_timeout: Duration,
    /// Application the gate forwards passed-through requests to.
    pub upstream_url: Option<String>,
}

impl GateConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let listen_addr = get("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("LISTEN_ADDR must be a socket address like 0.0.0.0:8080")?;

        let jwt_secret = get("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            DEV_JWT_SECRET.to_string()
        });

        let token_ttl_secs = match get("TOKEN_TTL_SECS") {
            Some(v) => v.parse::<i64>().context("TOKEN_TTL_SECS must be an integer")?,
            None => DEFAULT_TOKEN_TTL_SECS,
        };
        anyhow::ensure!(token_ttl_secs > 0, "TOKEN_TTL_SECS must be positive");

        let timeout_ms = match get("ACCOUNT_API_TIMEOUT_MS") {
            Some(v) => v.parse::<u64>().context("ACCOUNT_API_TIMEOUT_MS must be an integer")?,
            None => DEFAULT_ACCOUNT_API_TIMEOUT_MS,
        };

        Ok(Self {
            listen_addr,
            jwt_secret,
            token_ttl: chrono::Duration::seconds(token_ttl_secs),
            account_api_url: get("ACCOUNT_API_URL").unwrap_or_else(|| DEFAULT_ACCOUNT_API_URL.to_string()),
            account_api_timeout: Duration::from_millis(timeout_ms),
            upstream_url: get("UPSTREAM_URL"),
        })
    }
}
