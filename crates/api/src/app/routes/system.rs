use axum::{
    Extension, Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::app::errors::json_error;
use crate::context::IdentityContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Echo the identity the gate resolved for this request.
pub async fn whoami(identity: Option<Extension<IdentityContext>>) -> Response {
    match identity {
        Some(Extension(identity)) => Json(identity).into_response(),
        None => json_error(StatusCode::UNAUTHORIZED, "unauthenticated", "no identity token for this request"),
    }
}
