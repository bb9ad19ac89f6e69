//! Bearer-token issuance and validation.
//!
//! HS256 JWTs signed with a process-wide secret. Decoding is deliberately
//! total: anything short of a valid, unexpired, correctly-signed token comes
//! back as `None`, and the caller treats absence-of-claims as
//! "unauthenticated" rather than an error path.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims embedded in an issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject email.
    pub sub: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token encoding failed: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
}

/// Issues and validates bearer tokens for a single signing secret.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl_minutes: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Sign a token for `subject`, expiring one TTL after `now`.
    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding,
        )?)
    }

    /// Decode and verify a token.
    ///
    /// `None` on expiry, signature mismatch, or malformed input.
    pub fn decode(&self, token: &str) -> Option<Claims> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(b"test-secret", 30)
    }

    #[test]
    fn issue_then_decode_returns_subject() {
        let svc = service();
        let token = svc.issue("alice@example.com", Utc::now()).unwrap();
        let claims = svc.decode(&token).unwrap();
        assert_eq!(claims.sub, "alice@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_decodes_to_none() {
        let svc = service();
        let issued = Utc::now() - Duration::minutes(31);
        let token = svc.issue("alice@example.com", issued).unwrap();
        assert!(svc.decode(&token).is_none());
    }

    #[test]
    fn wrong_secret_decodes_to_none() {
        let token = service().issue("alice@example.com", Utc::now()).unwrap();
        let other = TokenService::new(b"different-secret", 30);
        assert!(other.decode(&token).is_none());
    }

    #[test]
    fn garbage_decodes_to_none() {
        assert!(service().decode("not-a-token").is_none());
        assert!(service().decode("").is_none());
    }
}
