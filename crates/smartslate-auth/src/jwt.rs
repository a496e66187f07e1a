//! Session token signing and verification.

use crate::{Error, Result};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// `iss` claim stamped into every token.
pub const ISSUER: &str = "app.smartslate.io";

/// `aud` claim stamped into every token.
pub const AUDIENCE: &str = "smartslate.io";

/// Fixed session lifetime. Not configurable per call; refresh mints a whole
/// new token instead of extending this window.
pub const SESSION_TTL_SECONDS: u64 = 15 * 60;

/// The authenticated principal, as carried inside the signed token.
///
/// A value of this type only ever comes out of [`TokenCodec::verify`] or is
/// built by [`TokenCodec::sign`]; it is never accepted from unsigned input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Principal identity supplied by the caller at issuance time.
    pub sub: String,

    /// Opaque authorization hints. Not interpreted here.
    #[serde(default)]
    pub roles: Vec<String>,

    /// Token authority, always [`ISSUER`].
    pub iss: String,

    /// Consuming application, always [`AUDIENCE`].
    pub aud: String,

    /// Signing time, seconds since the Unix epoch.
    pub iat: u64,

    /// `iat + SESSION_TTL_SECONDS`.
    pub exp: u64,

    /// Random per-token nonce. Two tokens for the same subject signed in
    /// the same second still differ.
    pub jti: String,
}

/// Signs and verifies session tokens with a symmetric secret.
///
/// The secret is injected at construction so the codec can be exercised in
/// tests without touching the process environment.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenCodec {
    /// Build a codec from the configured secret.
    ///
    /// Fails when the secret is absent or blank so that a misconfigured
    /// deployment can never sign or verify anything (fails closed).
    pub fn new(secret: &str) -> Result<Self> {
        if secret.trim().is_empty() {
            return Err(Error::MissingSecret);
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    /// Sign a fresh token for `subject` with a full 15-minute window.
    pub fn sign(&self, subject: &str, roles: &[String]) -> Result<String> {
        let now = now_epoch_secs();
        let claims = SessionClaims {
            sub: subject.to_owned(),
            roles: roles.to_vec(),
            iss: ISSUER.to_owned(),
            aud: AUDIENCE.to_owned(),
            iat: now,
            exp: now + SESSION_TTL_SECONDS,
            jti: fresh_token_id(),
        };
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding,
        )?)
    }

    /// Decode and check a token: signature and algorithm first, then
    /// issuer, audience, and that the current time is within `[iat, exp]`.
    pub fn verify(&self, token: &str) -> Result<SessionClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        // iss/aud are matched manually below so both checks live in one
        // visible place regardless of jsonwebtoken version defaults.
        validation.validate_aud = false;

        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &validation)?;
        let claims = data.claims;

        if claims.iss != ISSUER {
            return Err(Error::Validation(format!(
                "issuer mismatch: got {}",
                claims.iss
            )));
        }
        if claims.aud != AUDIENCE {
            return Err(Error::Validation(format!(
                "audience mismatch: got {}",
                claims.aud
            )));
        }
        if claims.iat > now_epoch_secs() {
            return Err(Error::Validation("token issued in the future".to_string()));
        }

        Ok(claims)
    }
}

fn now_epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::from_secs(0))
        .as_secs()
}

fn fresh_token_id() -> String {
    format!("{:032x}", rand::random::<u128>())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new("unit-test-secret").unwrap()
    }

    fn roles(names: &[&str]) -> Vec<String> {
        names.iter().map(|r| (*r).to_string()).collect()
    }

    fn encode_claims(claims: &SessionClaims, secret: &str) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn valid_claims() -> SessionClaims {
        let now = now_epoch_secs();
        SessionClaims {
            sub: "alice@example.com".to_string(),
            roles: roles(&["admin"]),
            iss: ISSUER.to_string(),
            aud: AUDIENCE.to_string(),
            iat: now,
            exp: now + SESSION_TTL_SECONDS,
            jti: "fixed".to_string(),
        }
    }

    #[test]
    fn roundtrip_preserves_subject_and_roles() {
        let codec = codec();
        let token = codec.sign("alice@example.com", &roles(&["admin", "author"])).unwrap();
        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.roles, roles(&["admin", "author"]));
        assert_eq!(claims.exp, claims.iat + SESSION_TTL_SECONDS);
    }

    #[test]
    fn empty_roles_survive_roundtrip() {
        let codec = codec();
        let token = codec.sign("bob", &[]).unwrap();
        assert!(codec.verify(&token).unwrap().roles.is_empty());
    }

    #[test]
    fn blank_secret_is_rejected() {
        assert!(matches!(TokenCodec::new(""), Err(Error::MissingSecret)));
        assert!(matches!(TokenCodec::new("   "), Err(Error::MissingSecret)));
    }

    #[test]
    fn consecutive_signatures_differ() {
        let codec = codec();
        let a = codec.sign("alice", &[]).unwrap();
        let b = codec.sign("alice", &[]).unwrap();
        assert_ne!(a, b);
        assert!(codec.verify(&a).is_ok());
        assert!(codec.verify(&b).is_ok());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = codec().sign("alice", &[]).unwrap();
        let other = TokenCodec::new("a-different-secret").unwrap();
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut claims = valid_claims();
        claims.iat -= 3600;
        claims.exp = claims.iat + SESSION_TTL_SECONDS;
        let token = encode_claims(&claims, "unit-test-secret");
        assert!(codec().verify(&token).is_err());
    }

    #[test]
    fn foreign_issuer_is_rejected() {
        let mut claims = valid_claims();
        claims.iss = "another.example".to_string();
        let token = encode_claims(&claims, "unit-test-secret");
        assert!(matches!(codec().verify(&token), Err(Error::Validation(_))));
    }

    #[test]
    fn foreign_audience_is_rejected() {
        let mut claims = valid_claims();
        claims.aud = "another.example".to_string();
        let token = encode_claims(&claims, "unit-test-secret");
        assert!(matches!(codec().verify(&token), Err(Error::Validation(_))));
    }

    #[test]
    fn future_issued_at_is_rejected() {
        let mut claims = valid_claims();
        claims.iat += 3600;
        claims.exp = claims.iat + SESSION_TTL_SECONDS;
        let token = encode_claims(&claims, "unit-test-secret");
        assert!(matches!(codec().verify(&token), Err(Error::Validation(_))));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(codec().verify("not-a-token").is_err());
        assert!(codec().verify("").is_err());
    }
}
