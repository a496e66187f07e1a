//! Origin-based CORS trust decision.
//!
//! Credentialed cross-site requests are only acknowledged for origins whose
//! hostname falls under a trusted apex. The decision is computed here; the
//! HTTP layer turns it into headers. An untrusted origin gets no CORS
//! headers at all (the browser blocks the response; the server still
//! processes the request, since CORS is a browser-enforced boundary).

use crate::domain::{TrustedDomains, is_trusted_host};

/// Outcome of evaluating an `Origin` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsDecision {
    /// Echo this exact origin back with `Access-Control-Allow-Credentials`.
    /// Never a wildcard: credentials are involved.
    Allow {
        /// The verbatim `Origin` header value.
        origin: String,
    },

    /// Same-origin request, non-browser client, or untrusted origin. Emit
    /// no CORS headers.
    Ignore,
}

/// Evaluate an `Origin` header against the trusted apexes.
pub fn evaluate_origin(origin: Option<&str>, domains: &TrustedDomains) -> CorsDecision {
    let Some(origin) = origin else {
        return CorsDecision::Ignore;
    };
    match origin_hostname(origin) {
        Some(host) if is_trusted_host(host, domains) => CorsDecision::Allow {
            origin: origin.to_string(),
        },
        _ => CorsDecision::Ignore,
    }
}

/// Pull the hostname out of an `Origin` value (`scheme://host[:port]`).
fn origin_hostname(origin: &str) -> Option<&str> {
    let rest = origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"))?;
    let host = rest.split('/').next()?;
    if host.is_empty() { None } else { Some(host) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domains() -> TrustedDomains {
        TrustedDomains {
            apex: "example.com".to_string(),
            dev_apex: "example.test".to_string(),
        }
    }

    #[test]
    fn trusted_subdomain_origin_is_echoed() {
        let decision = evaluate_origin(Some("https://portal.example.com"), &domains());
        assert_eq!(
            decision,
            CorsDecision::Allow {
                origin: "https://portal.example.com".to_string()
            }
        );
    }

    #[test]
    fn dev_origin_with_port_is_trusted() {
        let decision = evaluate_origin(Some("http://app.example.test:5173"), &domains());
        assert!(matches!(decision, CorsDecision::Allow { .. }));
    }

    #[test]
    fn untrusted_origin_is_ignored() {
        assert_eq!(
            evaluate_origin(Some("https://evil.com"), &domains()),
            CorsDecision::Ignore
        );
        assert_eq!(
            evaluate_origin(Some("https://evilexample.com"), &domains()),
            CorsDecision::Ignore
        );
    }

    #[test]
    fn absent_or_malformed_origin_is_ignored() {
        assert_eq!(evaluate_origin(None, &domains()), CorsDecision::Ignore);
        assert_eq!(
            evaluate_origin(Some("portal.example.com"), &domains()),
            CorsDecision::Ignore
        );
        assert_eq!(
            evaluate_origin(Some("https://"), &domains()),
            CorsDecision::Ignore
        );
    }
}
