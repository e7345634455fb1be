use serde::Serialize;

use mk8gate_auth::IdentityToken;

/// Identity resolved by the gate for the current request.
///
/// Present in request extensions only when a token was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IdentityContext {
    token: IdentityToken,
}

impl IdentityContext {
    pub fn new(token: IdentityToken) -> Self {
        Self { token }
    }

    pub fn token(&self) -> &IdentityToken {
        &self.token
    }
}
