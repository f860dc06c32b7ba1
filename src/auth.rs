//! Bearer token issuance and verification.
//!
//! Two token shapes exist. Store-backed logins get a signed, expiring JWT.
//! Fallback mode issues the legacy unsigned `token_<username>_<id>` string,
//! which is only honored while the fallback flag is on.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    pub uid: i32,
    pub role: String,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid token")]
    Invalid,
    #[error("token expired")]
    Expired,
}

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: u64,
}

impl TokenService {
    #[must_use]
    pub fn new(secret: &str, ttl_seconds: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }

    #[must_use]
    pub const fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    pub fn issue(&self, username: &str, uid: i32, role: &str) -> anyhow::Result<String> {
        let ttl = i64::try_from(self.ttl_seconds).unwrap_or(i64::MAX);
        let claims = Claims {
            sub: username.to_string(),
            uid,
            role: role.to_string(),
            exp: chrono::Utc::now().timestamp() + ttl,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to sign token: {e}"))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

/// Build the legacy unsigned credential for a fallback user.
#[must_use]
pub fn fallback_token(username: &str, id: i32) -> String {
    format!("token_{username}_{id}")
}

/// Parse `token_<username>_<id>`. Anything without the exact three-part
/// underscore shape, or with a non-numeric id, is rejected.
#[must_use]
pub fn parse_fallback_token(token: &str) -> Option<(&str, i32)> {
    let parts: Vec<&str> = token.split('_').collect();
    if parts.len() != 3 || parts[0] != "token" {
        return None;
    }
    let id = parts[2].parse().ok()?;
    Some((parts[1], id))
}
