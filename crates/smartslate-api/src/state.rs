//! Shared request state.

use std::sync::Arc;

use smartslate_auth::{TokenCodec, TrustedDomains};

/// Process-wide, read-only state handed to every handler.
///
/// There is no session table and no lock: the codec and the domain policy
/// are fixed after startup, so clones are cheap and handlers never
/// coordinate with each other.
#[derive(Clone)]
pub struct AppState {
    /// Signs and verifies session tokens.
    pub codec: Arc<TokenCodec>,

    /// Apexes trusted for cookie sharing and CORS.
    pub domains: Arc<TrustedDomains>,
}

impl AppState {
    /// Bundle the configured codec and domain policy.
    pub fn new(codec: TokenCodec, domains: TrustedDomains) -> Self {
        Self {
            codec: Arc::new(codec),
            domains: Arc::new(domains),
        }
    }
}
