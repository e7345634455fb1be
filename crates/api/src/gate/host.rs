use std::net::IpAddr;

use axum::http::{HeaderMap, Uri, header};

/// Hostname the client addressed, without port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHost {
    hostname: String,
}

impl RequestHost {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into().to_ascii_lowercase(),
        }
    }

    /// From the `Host` header, falling back to the URI authority, then `localhost`.
    pub fn from_request(headers: &HeaderMap, uri: &Uri) -> Self {
        let authority = headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .or_else(|| uri.authority().map(|a| a.as_str()))
            .map(str::trim)
            .filter(|s| !s.is_empty());

        match authority {
            Some(authority) => Self::new(strip_port(authority)),
            None => Self::new("localhost"),
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// The hostname with its first dot-delimited label removed.
    ///
    /// A hostname without dots is its own parent.
    pub fn parent_domain(&self) -> &str {
        match self.hostname.split_once('.') {
            Some((_, parent)) => parent,
            None => &self.hostname,
        }
    }

    /// `Domain` attribute for cookies shared across sibling subdomains.
    ///
    /// `None` for single-label hosts and IP literals, where browsers reject a
    /// domain attribute.
    pub fn cookie_domain(&self) -> Option<String> {
        if self.is_ip_literal() || !self.hostname.contains('.') {
            return None;
        }
        Some(format!(".{}", self.parent_domain()))
    }

    /// Account-service login page that sends the user back to this host.
    pub fn login_url(&self) -> String {
        format!(
            "https://{}/account/login?redirect=http://{}",
            self.parent_domain(),
            self.hostname
        )
    }

    fn is_ip_literal(&self) -> bool {
        self.hostname
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .is_ok()
    }
}

fn strip_port(authority: &str) -> &str {
    if let Some(rest) = authority.strip_prefix('[') {
        // [v6]:port
        return match rest.find(']') {
            Some(end) => &authority[..end + 2],
            None => authority,
        };
    }
    match authority.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => authority,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use proptest::prelude::*;

    fn host_header(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn strips_port_from_host_header() {
        let host = RequestHost::from_request(&host_header("mk8.pretendo.network:8080"), &Uri::from_static("/"));
        assert_eq!(host.hostname(), "mk8.pretendo.network");
    }

    #[test]
    fn falls_back_to_uri_authority_then_localhost() {
        let host = RequestHost::from_request(&HeaderMap::new(), &Uri::from_static("http://a.example.com/x"));
        assert_eq!(host.hostname(), "a.example.com");

        let host = RequestHost::from_request(&HeaderMap::new(), &Uri::from_static("/x"));
        assert_eq!(host.hostname(), "localhost");
    }

    #[test]
    fn keeps_ipv6_brackets() {
        let host = RequestHost::from_request(&host_header("[::1]:3000"), &Uri::from_static("/"));
        assert_eq!(host.hostname(), "[::1]");
        assert_eq!(host.cookie_domain(), None);
    }

    #[test]
    fn parent_domain_drops_first_label() {
        let host = RequestHost::new("mk8.pretendo.network");
        assert_eq!(host.parent_domain(), "pretendo.network");
        assert_eq!(host.cookie_domain().as_deref(), Some(".pretendo.network"));
    }

    #[test]
    fn single_label_host_is_its_own_parent() {
        let host = RequestHost::new("localhost");
        assert_eq!(host.parent_domain(), "localhost");
        assert_eq!(host.cookie_domain(), None);
    }

    #[test]
    fn ip_hosts_get_no_cookie_domain() {
        assert_eq!(RequestHost::new("127.0.0.1").cookie_domain(), None);
    }

    #[test]
    fn login_url_points_back_to_original_host() {
        let host = RequestHost::new("mk8.pretendo.network");
        assert_eq!(
            host.login_url(),
            "https://pretendo.network/account/login?redirect=http://mk8.pretendo.network"
        );
    }

    proptest! {
        #[test]
        fn parent_is_suffix_after_first_label(
            first in "[a-z][a-z0-9]{0,9}",
            rest in prop::collection::vec("[a-z0-9]{1,10}", 1..4)
        ) {
            let parent = rest.join(".");
            let host = RequestHost::new(format!("{first}.{parent}"));
            prop_assert_eq!(host.parent_domain(), parent.as_str());
            prop_assert_eq!(host.cookie_domain(), Some(format!(".{parent}")));
        }
    }
}
