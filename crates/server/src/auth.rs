//! Password hashing and bearer tokens.
//!
//! [`Credentials`] is built once at startup from an [`AuthConfig`] and shared
//! by every request. Passwords are stored as Argon2id PHC strings; tokens are
//! HS256 JWTs whose subject is the user's phone.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

fn default_token_ttl_minutes() -> i64 {
    DEFAULT_TOKEN_TTL_MINUTES
}

#[derive(Clone, Debug, Deserialize)]
pub struct AuthConfig {
    pub secret_key: String,
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,
}

impl AuthConfig {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            token_ttl_minutes: DEFAULT_TOKEN_TTL_MINUTES,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid auth configuration: {0}")]
    Config(String),
    #[error("Incorrect phone or password")]
    InvalidCredentials,
    #[error("Could not validate credentials")]
    InvalidToken,
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("token encoding failed: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone, Debug)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct Credentials {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: TimeDelta,
    argon2: Argon2<'static>,
}

impl Credentials {
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        if config.secret_key.is_empty() {
            return Err(AuthError::Config(
                "secret_key must not be empty".to_string(),
            ));
        }
        if config.token_ttl_minutes <= 0 {
            return Err(AuthError::Config(
                "token_ttl_minutes must be > 0".to_string(),
            ));
        }
        let ttl = TimeDelta::try_minutes(config.token_ttl_minutes)
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or_else(|| AuthError::Config("token_ttl_minutes is out of range".to_string()))?;

        Ok(Self {
            encoding: EncodingKey::from_secret(config.secret_key.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret_key.as_bytes()),
            ttl,
            argon2: Argon2::default(),
        })
    }

    /// Hash a password with a fresh random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| AuthError::Hash(err.to_string()))
    }

    /// Check a password against a stored digest. A malformed digest never
    /// verifies.
    pub fn verify_password(&self, password: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };
        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Issue a token for `phone`, valid for the configured time-to-live.
    pub fn issue_token(&self, phone: &str) -> Result<AccessToken, AuthError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AuthError::Config("token expiry is out of range".to_string()))?;
        let claims = Claims {
            sub: phone.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(AccessToken { token, expires_at })
    }

    /// Validate signature and expiry of a token and return its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|err| {
                tracing::debug!("rejected token: {err}");
                AuthError::InvalidToken
            })?;
        if data.claims.sub.is_empty() {
            return Err(AuthError::InvalidToken);
        }
        Ok(data.claims)
    }
}
