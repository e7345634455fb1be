//! HTTP application wiring (Axum router + gate wiring).
//!
//! - `routes/`: handlers the gate serves itself, plus the upstream proxy fallback
//! - `errors.rs`: consistent JSON error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use mk8gate_auth::{AccountVerifier, Hs256TokenCodec};

use crate::account::HttpAccountVerifier;
use crate::config::GateConfig;
use crate::gate::RouteMatcher;
use crate::middleware::{self, GateState};
use crate::resolver::TokenResolver;

pub mod errors;
pub mod routes;

/// Build the full HTTP router from configuration (public entrypoint used by `main.rs`).
pub fn build_app(config: &GateConfig) -> anyhow::Result<Router> {
    let codec = Arc::new(Hs256TokenCodec::new(config.jwt_secret.as_bytes(), config.token_ttl));
    let verifier: Arc<dyn AccountVerifier> = Arc::new(HttpAccountVerifier::new(
        &config.account_api_url,
        config.account_api_timeout,
        codec.clone(),
    )?);

    let upstream = config
        .upstream_url
        .as_deref()
        .map(routes::proxy::Upstream::new)
        .transpose()?
        .map(Arc::new);

    let matcher = RouteMatcher::default();
    tracing::debug!(patterns = ?matcher.patterns().collect::<Vec<_>>(), "gated routes");
    let state = GateState {
        matcher: Arc::new(matcher),
        resolver: TokenResolver::new(codec, verifier),
    };

    Ok(build_router(state, upstream))
}

/// Router with the gate in front of every route, using already-built collaborators.
pub fn build_router(state: GateState, upstream: Option<Arc<routes::proxy::Upstream>>) -> Router {
    let mut app = routes::router();
    if let Some(upstream) = upstream {
        app = app.layer(Extension(upstream));
    }

    app.layer(
        ServiceBuilder::new().layer(axum::middleware::from_fn_with_state(
            state,
            middleware::gate_middleware,
        )),
    )
}
