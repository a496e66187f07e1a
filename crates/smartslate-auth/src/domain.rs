//! Cookie-domain resolution.
//!
//! Maps a request host to the cookie `Domain` attribute that enables
//! cross-subdomain sharing, or to none for hosts outside the trusted
//! apexes. The input comes from `Host`/`X-Forwarded-Host` headers and is
//! attacker-influenced, so the result is only ever used to pick a cookie
//! attribute, never for authorization.

/// The apex domains whose subdomains share the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedDomains {
    /// Production apex, e.g. `smartslate.io`.
    pub apex: String,

    /// Local-development apex, e.g. `smartslate.test`. Keeps the
    /// cross-subdomain behavior reproducible on a developer machine.
    pub dev_apex: String,
}

impl Default for TrustedDomains {
    fn default() -> Self {
        Self {
            apex: "smartslate.io".to_string(),
            dev_apex: "smartslate.test".to_string(),
        }
    }
}

/// Resolve the cookie `Domain` attribute for a request host.
///
/// The production apex is checked before the development apex. Returns the
/// matched apex with a leading dot, or `None` for a host-only cookie.
pub fn resolve_cookie_domain(host: &str, domains: &TrustedDomains) -> Option<String> {
    let host = normalize_host(host)?;
    if host_under_apex(&host, &domains.apex) {
        return Some(format!(".{}", domains.apex.trim_start_matches('.')));
    }
    if host_under_apex(&host, &domains.dev_apex) {
        return Some(format!(".{}", domains.dev_apex.trim_start_matches('.')));
    }
    None
}

/// True when `host` is the apex itself or one of its subdomains.
pub fn is_trusted_host(host: &str, domains: &TrustedDomains) -> bool {
    match normalize_host(host) {
        Some(host) => {
            host_under_apex(&host, &domains.apex) || host_under_apex(&host, &domains.dev_apex)
        }
        None => false,
    }
}

fn normalize_host(host: &str) -> Option<String> {
    let mut host = host.trim().to_lowercase();

    // Strip port, if any.
    if let Some((h, _port)) = host.split_once(':') {
        host = h.to_string();
    }

    if host.is_empty() { None } else { Some(host) }
}

fn host_under_apex(host: &str, apex: &str) -> bool {
    let apex = apex.trim().trim_start_matches('.').to_lowercase();
    if apex.is_empty() {
        return false;
    }
    // Suffix match on a label boundary only: `portal.example.com` falls
    // under `example.com`, `evilexample.com` does not.
    host == apex
        || host
            .strip_suffix(&apex)
            .is_some_and(|prefix| prefix.ends_with('.'))
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
    fn production_subdomains_share_the_apex() {
        assert_eq!(
            resolve_cookie_domain("portal.example.com", &domains()),
            Some(".example.com".to_string())
        );
        assert_eq!(
            resolve_cookie_domain("deep.portal.example.com", &domains()),
            Some(".example.com".to_string())
        );
        assert_eq!(
            resolve_cookie_domain("example.com", &domains()),
            Some(".example.com".to_string())
        );
    }

    #[test]
    fn dev_suffix_resolves_for_local_hosts() {
        assert_eq!(
            resolve_cookie_domain("app.example.test", &domains()),
            Some(".example.test".to_string())
        );
    }

    #[test]
    fn unrelated_hosts_get_no_domain_attribute() {
        assert_eq!(resolve_cookie_domain("localhost", &domains()), None);
        assert_eq!(resolve_cookie_domain("evil.com", &domains()), None);
        assert_eq!(resolve_cookie_domain("", &domains()), None);
    }

    #[test]
    fn lookalike_suffix_is_not_a_subdomain() {
        assert_eq!(resolve_cookie_domain("evilexample.com", &domains()), None);
        assert_eq!(resolve_cookie_domain("notexample.test", &domains()), None);
    }

    #[test]
    fn port_and_case_are_ignored() {
        assert_eq!(
            resolve_cookie_domain("Portal.Example.COM:8443", &domains()),
            Some(".example.com".to_string())
        );
        assert!(is_trusted_host("app.example.test:5173", &domains()));
    }
}
