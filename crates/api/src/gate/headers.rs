use axum::http::{HeaderMap, HeaderName, HeaderValue, header};
use axum_extra::extract::cookie::Cookie;

use mk8gate_auth::IdentityToken;

use super::CookieChange;

pub const SAL_HEADER: HeaderName = HeaderName::from_static("x-mk8-pretendo-sal");
pub const USERNAME_HEADER: HeaderName = HeaderName::from_static("x-mk8-pretendo-username");
pub const IMAGE_URL_HEADER: HeaderName = HeaderName::from_static("x-mk8-pretendo-imageurl");
pub const PID_HEADER: HeaderName = HeaderName::from_static("x-mk8-pretendo-pid");

pub const IDENTITY_HEADERS: [HeaderName; 4] = [SAL_HEADER, USERNAME_HEADER, IMAGE_URL_HEADER, PID_HEADER];

/// Write the four identity headers for `token`.
///
/// A field that is not a legal header value is skipped with a warning.
pub fn insert_identity(headers: &mut HeaderMap, token: &IdentityToken) {
    let fields = [
        (SAL_HEADER, token.server_access_level.clone()),
        (USERNAME_HEADER, token.pnid.clone()),
        (IMAGE_URL_HEADER, token.mii_image_url.clone()),
        (PID_HEADER, token.pid.to_string()),
    ];

    for (name, value) in fields {
        match HeaderValue::from_str(&value) {
            Ok(value) => {
                headers.insert(name, value);
            }
            Err(_) => {
                tracing::warn!(header = %name, pid = %token.pid, "identity field is not a valid header value; skipped");
            }
        }
    }
}

/// Drop any identity headers a client tried to supply itself.
pub fn strip_identity(headers: &mut HeaderMap) {
    for name in IDENTITY_HEADERS {
        headers.remove(name);
    }
}

/// Render a cookie change as a `Set-Cookie` header scoped to `domain`.
pub fn append_cookie(headers: &mut HeaderMap, change: &CookieChange, domain: Option<&str>) {
    let mut cookie = match change {
        CookieChange::Set { name, value } => Cookie::new(*name, value.clone()),
        CookieChange::Clear(name) => {
            let mut cookie = Cookie::new(*name, "");
            cookie.make_removal();
            cookie
        }
    };
    cookie.set_path("/");
    if let Some(domain) = domain {
        cookie.set_domain(domain.to_string());
    }

    match HeaderValue::from_str(&cookie.to_string()) {
        Ok(value) => {
            headers.append(header::SET_COOKIE, value);
        }
        Err(_) => {
            tracing::warn!(cookie = cookie.name(), "cookie is not a valid header value; skipped");
        }
    }
}
