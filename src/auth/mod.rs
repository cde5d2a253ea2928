use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Longest token lifetime honoured; larger requests are capped to it
pub const MAX_TOKEN_LIFETIME_HOURS: u64 = 24 * 366 * 10;

impl Claims {
    pub fn new(sub: impl Into<String>, role: impl Into<String>, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let hours = expiry_hours.min(MAX_TOKEN_LIFETIME_HOURS) as i64;
        let exp = (now + Duration::hours(hours)).timestamp();

        Self {
            sub: sub.into(),
            role: role.into(),
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT secret not configured")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),
}

/// What the HTTP layer needs to authenticate and authorize writes
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub admin_role: String,
}

impl AuthSettings {
    pub fn new(jwt_secret: impl Into<String>, admin_role: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            admin_role: admin_role.into(),
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(security.jwt_secret.clone(), security.admin_role.clone())
    }

    /// Role names compare case-insensitively; a `ROLE_` prefix is ignored
    pub fn is_admin(&self, role: &str) -> bool {
        normalize_role(role) == normalize_role(&self.admin_role)
    }
}

fn normalize_role(role: &str) -> String {
    let role = role.trim();
    let role = role
        .get(..5)
        .filter(|prefix| prefix.eq_ignore_ascii_case("ROLE_"))
        .map_or(role, |_| &role[5..]);
    role.to_ascii_uppercase()
}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    decode::<Claims>(token, &decoding_key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| JwtError::InvalidToken(e.to_string()))
}
