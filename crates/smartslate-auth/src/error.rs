//! Error types.

use thiserror::Error;

/// Crate result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by this crate.
///
/// Variants carry enough detail for server-side logs; the HTTP layer is
/// responsible for collapsing every verification failure into one uniform
/// client-visible response.
#[derive(Debug, Error)]
pub enum Error {
    /// The signing secret is absent or empty. This is a deployment
    /// misconfiguration: no token can be signed or verified without it.
    #[error("session signing secret is not configured")]
    MissingSecret,

    /// Token claims failed validation.
    #[error("token validation failed: {0}")]
    Validation(String),

    /// jsonwebtoken error (bad signature, expired, malformed encoding).
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl Error {
    /// True for every failure mode that means "the presented credential is
    /// not acceptable", as opposed to a server-side configuration problem.
    pub fn is_credential_failure(&self) -> bool {
        !matches!(self, Error::MissingSecret)
    }
}
