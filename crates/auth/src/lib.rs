//! `mk8gate-auth` — identity token model and resolution contracts.
//!
//! This crate is intentionally decoupled from HTTP: cookies, headers and the
//! account-service client live in `mk8gate-api`.

pub mod access;
pub mod claims;
pub mod jwt;
pub mod principal;
pub mod resolve;
pub mod token;

pub use access::AccessLevel;
pub use claims::{IdentityClaims, TokenValidationError, validate_claims};
pub use jwt::{Hs256TokenCodec, SigningError, TokenDecoder, TokenSigner};
pub use principal::Pid;
pub use resolve::{AccountCredentials, AccountVerifier, ResolveError, VerifiedAccount};
pub use token::IdentityToken;
