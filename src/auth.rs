//! Password verification and JWT issuance for the login endpoint.
//!
//! Tokens are HS256-signed with a shared secret and carry the user id in
//! the `sub` claim.

use crate::error::{CorkboardError, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered user. The password hash stays in storage; login responses
/// expose only id, email and username.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

impl User {
    /// Creates a new user, hashing the given plaintext password
    pub fn new(email: String, username: String, password: &str) -> Self {
        Self {
            id: UserId::new(),
            email,
            username,
            password_hash: hash_password(password),
        }
    }

    /// Checks a login attempt against the stored hash
    pub fn verify_password(&self, password: &str) -> bool {
        verify_password(password, &self.password_hash)
    }
}

/// Hashes a plaintext password to a lowercase hex digest
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Compares a plaintext password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    hash_password(password) == hash
}

/// JWT claims carried by login tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id the token was issued for
    pub sub: String,
    /// Issued-at, seconds since the epoch
    pub iat: usize,
    /// Expiry, seconds since the epoch
    pub exp: usize,
}

/// Token signing configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl AuthConfig {
    /// Creates a configuration with the default 24 hour token lifetime
    pub fn new(jwt_secret: String) -> Self {
        Self {
            jwt_secret,
            token_ttl: Duration::hours(24),
        }
    }
}

/// Issues a signed token for the given user
pub fn generate_token(config: &AuthConfig, user: &User, now: DateTime<Utc>) -> Result<String> {
    let expires_at = now + config.token_ttl;
    let claims = Claims {
        sub: user.id.as_str().to_string(),
        iat: timestamp_to_usize(now.timestamp())?,
        exp: timestamp_to_usize(expires_at.timestamp())?,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )?;

    Ok(token)
}

/// Decodes and validates a token, returning its claims
pub fn verify_token(config: &AuthConfig, token: &str) -> Result<Claims> {
    let validation = Validation::new(Algorithm::HS256);
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )?;

    Ok(data.claims)
}

fn timestamp_to_usize(ts: i64) -> Result<usize> {
    usize::try_from(ts)
        .map_err(|_| CorkboardError::ConfigError(format!("timestamp out of range: {ts}")))
}
