//! HS256 codec for `mk8_token`.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::{IdentityClaims, IdentityToken, TokenValidationError, validate_claims};

/// Local, synchronous decode of a signed identity token.
pub trait TokenDecoder: Send + Sync {
    fn decode(&self, raw: &str, now: DateTime<Utc>) -> Result<IdentityToken, TokenValidationError>;
}

/// Mints signed identity tokens.
pub trait TokenSigner: Send + Sync {
    fn sign(&self, identity: &IdentityToken, now: DateTime<Utc>) -> Result<String, SigningError>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to sign identity token: {0}")]
pub struct SigningError(String);

/// Shared-secret (HS256) implementation of both [`TokenDecoder`] and [`TokenSigner`].
pub struct Hs256TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl Hs256TokenCodec {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // The time window is checked by `validate_claims` against the caller's clock.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }
}

impl core::fmt::Debug for Hs256TokenCodec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256TokenCodec")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenDecoder for Hs256TokenCodec {
    fn decode(&self, raw: &str, now: DateTime<Utc>) -> Result<IdentityToken, TokenValidationError> {
        let data = jsonwebtoken::decode::<IdentityClaims>(raw, &self.decoding, &self.validation)
            .map_err(|e| TokenValidationError::Malformed(e.to_string()))?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims.identity)
    }
}

impl TokenSigner for Hs256TokenCodec {
    fn sign(&self, identity: &IdentityToken, now: DateTime<Utc>) -> Result<String, SigningError> {
        let claims = IdentityClaims::new(identity.clone(), now, self.ttl);
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| SigningError(e.to_string()))
    }
}
