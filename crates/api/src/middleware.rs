use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;

use crate::context::IdentityContext;
use crate::gate::{
    self, Decision, Outcome, RequestHost, RouteMatcher,
    decision::{MK8_TOKEN_COOKIE, is_logout_path},
    headers::{append_cookie, insert_identity, strip_identity},
};
use crate::resolver::TokenResolver;

#[derive(Clone)]
pub struct GateState {
    pub matcher: Arc<RouteMatcher>,
    pub resolver: TokenResolver,
}

/// Runs the gate on every request covered by the route matcher.
pub async fn gate_middleware(
    State(state): State<GateState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    strip_identity(req.headers_mut());

    if !state.matcher.matches(&path) {
        return next.run(req).await;
    }

    let host = RequestHost::from_request(req.headers(), req.uri());
    let decision = if is_logout_path(&path) {
        let referer = req.headers().get(header::REFERER).and_then(|v| v.to_str().ok());
        gate::logout(referer)
    } else {
        let resolution = match state.resolver.resolve(&jar, Utc::now()).await {
            Ok(resolution) => Some(resolution),
            Err(e) => {
                tracing::debug!(%path, reason = %e, "request continues anonymously");
                None
            }
        };
        gate::decide(&path, &host, resolution, jar.get(MK8_TOKEN_COOKIE).is_some())
    };

    tracing::debug!(
        %path,
        outcome = ?decision.outcome,
        pid = decision.identity.as_ref().map(|t| t.pid.get()),
        access_level = decision.identity.as_ref().map(|t| t.access_level.get()),
        "gate decision"
    );

    let mut response = match &decision.outcome {
        Outcome::Redirect(location) => redirect(location),
        Outcome::PassThrough => {
            if let Some(token) = &decision.identity {
                req.extensions_mut().insert(IdentityContext::new(token.clone()));
            }
            next.run(req).await
        }
    };

    apply(&decision, &host, &mut response);
    response
}

/// Attach identity headers and cookie changes, identically for every outcome.
fn apply(decision: &Decision, host: &RequestHost, response: &mut Response) {
    let headers = response.headers_mut();
    if let Some(token) = &decision.identity {
        insert_identity(headers, token);
    }

    let domain = host.cookie_domain();
    for change in &decision.cookies {
        append_cookie(headers, change, domain.as_deref());
    }
}

fn redirect(location: &str) -> Response {
    let location = HeaderValue::from_str(location).unwrap_or_else(|_| {
        tracing::warn!(location, "redirect target is not a valid header value; using '/'");
        HeaderValue::from_static("/")
    });
    (StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response()
}
