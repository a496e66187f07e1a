//! Cookie helpers.
//!
//! The session cookie is modeled as a structured value and serialized in
//! exactly one place. Issue, Refresh, and Logout all go through
//! [`SessionCookie::header_value`], so the attribute combination the
//! clearing cookie carries always matches the one issuance used; browsers
//! ignore a deletion whose `Domain`/`Secure`/`SameSite` differ.

use httpdate::fmt_http_date;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::jwt::SESSION_TTL_SECONDS;

/// Cookie name shared by every subdomain of the portal.
pub const SESSION_COOKIE_NAME: &str = "ss_session";

/// SameSite attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    /// SameSite=Strict
    Strict,
    /// SameSite=Lax
    Lax,
    /// SameSite=None
    None,
}

impl SameSite {
    fn as_str(self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// The attributes that vary with the request environment.
///
/// `Path=/` and `HttpOnly` are unconditional and live in the serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieAttributes {
    /// Optional `Domain`, from the cookie-domain resolver. Absent means a
    /// host-only cookie.
    pub domain: Option<String>,

    /// Send on HTTPS only.
    pub secure: bool,

    /// SameSite attribute.
    pub same_site: SameSite,
}

impl CookieAttributes {
    /// Attributes for a request that did (or did not) arrive over HTTPS.
    ///
    /// Cross-site embedding requires `SameSite=None`, which browsers only
    /// accept together with `Secure`; plain-HTTP local development falls
    /// back to `Lax`.
    pub fn for_environment(domain: Option<String>, https: bool) -> Self {
        Self {
            domain,
            secure: https,
            same_site: if https { SameSite::None } else { SameSite::Lax },
        }
    }
}

/// A `ss_session` cookie ready to be written to a `Set-Cookie` header.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    /// The signed token, or empty for the clearing cookie.
    pub value: String,

    /// Environment-dependent attributes.
    pub attributes: CookieAttributes,

    /// Lifetime in seconds. Zero marks the clearing cookie.
    pub max_age_seconds: u64,
}

impl SessionCookie {
    /// Cookie carrying a freshly signed token, mirroring the token's
    /// 15-minute lifetime.
    pub fn issue(token: String, attributes: CookieAttributes) -> Self {
        Self {
            value: token,
            attributes,
            max_age_seconds: SESSION_TTL_SECONDS,
        }
    }

    /// Immediately expired cookie that deletes the session.
    pub fn expired(attributes: CookieAttributes) -> Self {
        Self {
            value: String::new(),
            attributes,
            max_age_seconds: 0,
        }
    }

    /// Serialize to a `Set-Cookie` header value.
    pub fn header_value(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        parts.push(format!("{SESSION_COOKIE_NAME}={}", self.value));
        parts.push("Path=/".to_string());

        if let Some(domain) = &self.attributes.domain {
            parts.push(format!("Domain={domain}"));
        }

        parts.push("HttpOnly".to_string());
        if self.attributes.secure {
            parts.push("Secure".to_string());
        }
        parts.push(format!("SameSite={}", self.attributes.same_site.as_str()));

        parts.push(format!("Max-Age={}", self.max_age_seconds));
        let expires = if self.max_age_seconds == 0 {
            UNIX_EPOCH
        } else {
            SystemTime::now() + Duration::from_secs(self.max_age_seconds)
        };
        parts.push(format!("Expires={}", fmt_http_date(expires)));

        parts.join("; ")
    }
}

/// Extract the session token from a `Cookie` request header.
pub fn session_cookie_value(header: &str) -> Option<&str> {
    header.split(';').find_map(|part| {
        let (name, value) = part.trim().split_once('=')?;
        (name == SESSION_COOKIE_NAME).then_some(value)
    })
}
