//! smartslate-auth
//!
//! Session-token primitives for the SmartSlate portal. One login mints a
//! short-lived signed cookie that every subdomain of the apex shares; this
//! crate holds the pieces that decision rests on:
//!
//! - **Signing and verifying tokens** ([`TokenCodec`]) — HS256 with strict
//!   issuer/audience/expiry checks and a fixed 15-minute lifetime
//! - **Resolving the cookie `Domain`** ([`resolve_cookie_domain`]) from the
//!   request host, so the cookie is shared under a trusted apex and
//!   host-only everywhere else
//! - **Building the session cookie** ([`SessionCookie`]) with one
//!   serializer, so issuance and deletion can never drift apart
//! - **Deciding CORS trust** ([`evaluate_origin`]) for credentialed
//!   cross-subdomain requests
//!
//! Everything here is pure computation over injected configuration; there
//! is no I/O and no stored session state. A valid token is the only source
//! of truth.
//!
//! ## Quick start
//! ```
//! use smartslate_auth::TokenCodec;
//!
//! # fn demo() -> smartslate_auth::Result<()> {
//! let codec = TokenCodec::new("server-side-secret")?;
//! let token = codec.sign("alice@example.com", &["admin".to_string()])?;
//! let claims = codec.verify(&token)?;
//! assert_eq!(claims.sub, "alice@example.com");
//! # Ok(()) }
//! ```

#![forbid(unsafe_code)]

mod cookie;
mod cors;
mod domain;
mod error;
mod jwt;

pub use cookie::{
    CookieAttributes, SESSION_COOKIE_NAME, SameSite, SessionCookie, session_cookie_value,
};
pub use cors::{CorsDecision, evaluate_origin};
pub use domain::{TrustedDomains, is_trusted_host, resolve_cookie_domain};
pub use error::{Error, Result};
pub use jwt::{AUDIENCE, ISSUER, SESSION_TTL_SECONDS, SessionClaims, TokenCodec};
