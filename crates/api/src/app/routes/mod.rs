use axum::{Router, routing::get};

pub mod proxy;
pub mod system;

/// Routes served by the gate itself; everything else falls through to the upstream.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/api/whoami", get(system::whoami))
        .fallback(proxy::forward)
}
