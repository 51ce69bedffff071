use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;

/// Name of the session cookie carrying the signed token.
pub const SESSION_COOKIE: &str = "session";

/// Prefix of every generated donor code.
pub const DONOR_CODE_PREFIX: &str = "DN";

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password.as_bytes(), DEFAULT_COST)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password.as_bytes(), hash)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub exp: i64,
    pub iat: i64,
}

/// Sign a session token for `user_id`. `remember` switches between the short
/// and the long expiration from the config.
pub fn generate_session_token(
    user_id: i64,
    remember: bool,
    config: &Config,
) -> Result<String, jsonwebtoken::errors::Error> {
    let ttl = if remember {
        config.remember_expiration()
    } else {
        config.session_expiration()
    };
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::seconds(ttl.as_secs() as i64))
        .unwrap_or(now)
        .timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        exp: expiration,
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.session_secret.as_bytes()),
    )
}

pub fn verify_session_token(
    token: &str,
    config: &Config,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.session_secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Generate a shareable donor code: fixed prefix plus 8 uppercase hex
/// characters from a random UUID. Probabilistically unique; the store's
/// unique index is the backstop.
pub fn generate_donor_code() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{}{}", DONOR_CODE_PREFIX, id[..8].to_uppercase())
}
