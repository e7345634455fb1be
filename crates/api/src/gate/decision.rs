//! Pure access decision for a gated request.
//!
//! Nothing here does IO: the middleware resolves the token first, then asks
//! for a [`Decision`] and applies it in one place.

use mk8gate_auth::{IdentityToken, VerifiedAccount};

use super::RequestHost;
use super::matcher::first_segment;

pub const MK8_TOKEN_COOKIE: &str = "mk8_token";
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";
pub const TOKEN_TYPE_COOKIE: &str = "token_type";

/// Cookies wiped by `/logout`.
pub const LOGOUT_COOKIES: [&str; 4] = [
    MK8_TOKEN_COOKIE,
    ACCESS_TOKEN_COOKIE,
    REFRESH_TOKEN_COOKIE,
    TOKEN_TYPE_COOKIE,
];

/// Where a resolved identity came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Decoded from the existing `mk8_token` cookie.
    Cookie(IdentityToken),
    /// Confirmed by the account service, with a newly signed `mk8_token`.
    Minted(VerifiedAccount),
}

impl Resolution {
    /// Split into the identity and the token to persist client-side, if any.
    pub fn into_parts(self) -> (IdentityToken, Option<String>) {
        match self {
            Self::Cookie(token) => (token, None),
            Self::Minted(account) => (account.token, Some(account.signed_token)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Redirect(String),
    PassThrough,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieChange {
    Set { name: &'static str, value: String },
    Clear(&'static str),
}

/// Everything the gate does to a response, decided up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub outcome: Outcome,
    /// Identity whose headers are attached to the response.
    pub identity: Option<IdentityToken>,
    pub cookies: Vec<CookieChange>,
}

/// Segment-wise, so `//logout` reads the same as `/logout`.
pub fn is_logout_path(path: &str) -> bool {
    first_segment(path) == Some("logout")
}

/// Segment-wise, so `//admin/x` reads the same as `/admin/x`.
pub fn is_admin_path(path: &str) -> bool {
    first_segment(path) == Some("admin")
}

/// `/logout`: back to the referring page with every auth cookie cleared.
pub fn logout(referer: Option<&str>) -> Decision {
    let target = referer
        .map(str::trim)
        .filter(|r| is_safe_redirect(r))
        .unwrap_or("/");

    Decision {
        outcome: Outcome::Redirect(target.to_string()),
        identity: None,
        cookies: LOGOUT_COOKIES.into_iter().map(CookieChange::Clear).collect(),
    }
}

/// An absolute `http(s)` URL, or a same-origin path (not `//host` or `/\host`).
fn is_safe_redirect(target: &str) -> bool {
    if target.starts_with('/') {
        return !target.starts_with("//")
            && !target.starts_with("/\\")
            && reqwest::Url::parse("http://localhost")
                .and_then(|base| base.join(target))
                .is_ok();
    }
    match reqwest::Url::parse(target) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}

/// Decide a non-logout request.
///
/// `token_cookie_present` reports whether the request carried an `mk8_token`
/// cookie at all; when resolution still failed, that cookie is stale.
pub fn decide(
    path: &str,
    host: &RequestHost,
    resolution: Option<Resolution>,
    token_cookie_present: bool,
) -> Decision {
    let (identity, minted) = match resolution {
        Some(resolution) => {
            let (identity, minted) = resolution.into_parts();
            (Some(identity), minted)
        }
        None => (None, None),
    };

    let cookies: Vec<CookieChange> = minted
        .map(|value| CookieChange::Set {
            name: MK8_TOKEN_COOKIE,
            value,
        })
        .into_iter()
        .collect();

    if !is_admin_path(path) {
        return Decision {
            outcome: Outcome::PassThrough,
            identity,
            cookies,
        };
    }

    match identity {
        None => Decision {
            outcome: Outcome::Redirect(host.login_url()),
            identity: None,
            cookies: if token_cookie_present {
                vec![CookieChange::Clear(MK8_TOKEN_COOKIE)]
            } else {
                Vec::new()
            },
        },
        Some(token) if !token.is_admin() => Decision {
            outcome: Outcome::Redirect("/".to_string()),
            identity: Some(token),
            cookies,
        },
        Some(token) => Decision {
            outcome: Outcome::PassThrough,
            identity: Some(token),
            cookies,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mk8gate_auth::{AccessLevel, Pid};

    fn token(level: i32) -> IdentityToken {
        IdentityToken {
            pid: Pid::new(42),
            pnid: "alice".to_string(),
            access_level: AccessLevel::new(level),
            server_access_level: "3".to_string(),
            mii_image_url: "http://x/y.png".to_string(),
        }
    }

    fn minted(level: i32) -> Resolution {
        Resolution::Minted(VerifiedAccount {
            token: token(level),
            signed_token: "fresh.jwt.value".to_string(),
        })
    }

    fn host() -> RequestHost {
        RequestHost::new("mk8.pretendo.network")
    }

    fn set_fresh() -> CookieChange {
        CookieChange::Set {
            name: MK8_TOKEN_COOKIE,
            value: "fresh.jwt.value".to_string(),
        }
    }

    #[test]
    fn logout_redirects_to_referer() {
        let d = logout(Some("https://mk8.pretendo.network/rankings"));
        assert_eq!(d.outcome, Outcome::Redirect("https://mk8.pretendo.network/rankings".to_string()));
        assert_eq!(d.identity, None);
    }

    #[test]
    fn logout_without_referer_goes_home_and_clears_all_cookies() {
        for referer in [
            None,
            Some(""),
            Some("   "),
            Some("::not a url::"),
            Some("javascript:alert(1)"),
            Some("data:text/html,hi"),
            Some("//evil.example/"),
            Some("/\\evil.example/"),
            Some("rankings"),
        ] {
            let d = logout(referer);
            assert_eq!(d.outcome, Outcome::Redirect("/".to_string()));
            assert_eq!(
                d.cookies,
                LOGOUT_COOKIES.into_iter().map(CookieChange::Clear).collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn logout_accepts_same_origin_paths() {
        let d = logout(Some("/rankings?page=2"));
        assert_eq!(d.outcome, Outcome::Redirect("/rankings?page=2".to_string()));
    }

    #[test]
    fn repeated_slashes_do_not_change_the_branch() {
        assert!(is_admin_path("//admin/rankings"));
        assert!(is_admin_path("/admin"));
        assert!(!is_admin_path("/rankings/admin"));
        assert!(is_logout_path("//logout"));

        let d = decide("//admin/rankings", &host(), None, false);
        assert_eq!(
            d.outcome,
            Outcome::Redirect(
                "https://pretendo.network/account/login?redirect=http://mk8.pretendo.network".to_string()
            )
        );
    }

    #[test]
    fn admin_without_token_redirects_to_login() {
        let d = decide("/admin/rankings", &host(), None, false);
        assert_eq!(
            d.outcome,
            Outcome::Redirect(
                "https://pretendo.network/account/login?redirect=http://mk8.pretendo.network".to_string()
            )
        );
        assert!(d.cookies.is_empty());
        assert_eq!(d.identity, None);
    }

    #[test]
    fn admin_without_token_clears_stale_cookie() {
        let d = decide("/admin", &host(), None, true);
        assert_eq!(d.cookies, vec![CookieChange::Clear(MK8_TOKEN_COOKIE)]);
    }

    #[test]
    fn admin_with_low_level_redirects_home_with_identity() {
        let d = decide("/admin", &host(), Some(Resolution::Cookie(token(2))), true);
        assert_eq!(d.outcome, Outcome::Redirect("/".to_string()));
        assert_eq!(d.identity, Some(token(2)));
        assert!(d.cookies.is_empty());
    }

    #[test]
    fn admin_with_low_level_still_persists_minted_token() {
        let d = decide("/admin", &host(), Some(minted(0)), false);
        assert_eq!(d.outcome, Outcome::Redirect("/".to_string()));
        assert_eq!(d.cookies, vec![set_fresh()]);
    }

    #[test]
    fn admin_with_admin_level_passes_through() {
        let d = decide("/admin/rankings", &host(), Some(Resolution::Cookie(token(3))), true);
        assert_eq!(d.outcome, Outcome::PassThrough);
        assert_eq!(d.identity, Some(token(3)));
        assert!(d.cookies.is_empty());
    }

    #[test]
    fn admin_with_minted_admin_sets_cookie() {
        let d = decide("/admin", &host(), Some(minted(5)), false);
        assert_eq!(d.outcome, Outcome::PassThrough);
        assert_eq!(d.cookies, vec![set_fresh()]);
    }

    #[test]
    fn non_admin_anonymous_passes_through_bare() {
        let d = decide("/rankings", &host(), None, true);
        assert_eq!(d.outcome, Outcome::PassThrough);
        assert_eq!(d.identity, None);
        assert!(d.cookies.is_empty());
    }

    #[test]
    fn non_admin_with_token_passes_through_with_identity() {
        let d = decide("/", &host(), Some(Resolution::Cookie(token(0))), true);
        assert_eq!(d.outcome, Outcome::PassThrough);
        assert_eq!(d.identity, Some(token(0)));
    }

    #[test]
    fn non_admin_with_minted_token_sets_cookie() {
        let d = decide("/dashboard", &host(), Some(minted(1)), false);
        assert_eq!(d.outcome, Outcome::PassThrough);
        assert_eq!(d.cookies, vec![set_fresh()]);
    }
}
