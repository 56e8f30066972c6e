//! JWT session token creation and verification.
//!
//! Tokens are HS256-signed with the configured secret and carry the user's email
//! as the `sub` claim. Decode failures are distinguished internally so the
//! extractor can log what went wrong, but every failure class maps to the same
//! 401 at the HTTP boundary.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use crate::{config::Config, errors::Error};

/// JWT session claims
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String, // Subject (user email)
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
}

impl SessionClaims {
    /// Create new session claims for a user
    pub fn new(subject: &str, config: &Config) -> Self {
        let now = Utc::now();
        let exp = now + config.auth.security.jwt_expiry;

        Self {
            sub: subject.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        }
    }
}

/// Why a session token failed to decode.
///
/// The distinction exists for logging only. Callers must not surface it to
/// clients: a forged token and an expired one both get the same response.
#[derive(ThisError, Debug)]
pub enum TokenError {
    #[error("token is malformed: {0}")]
    Malformed(String),
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
}

/// Create a JWT token for a user session
pub fn create_session_token(subject: &str, config: &Config) -> Result<String, Error> {
    let claims = SessionClaims::new(subject, config);
    let secret_key = config.secret_key.as_ref().ok_or_else(|| Error::Internal {
        operation: "JWT sessions: secret_key is required".to_string(),
    })?;

    let key = EncodingKey::from_secret(secret_key.as_bytes());
    encode(&Header::default(), &claims, &key).map_err(|e| Error::Internal {
        operation: format!("create JWT: {e}"),
    })
}

/// Verify and decode a JWT session token
pub fn decode_session_token(token: &str, secret_key: &str) -> Result<SessionClaims, TokenError> {
    let key = DecodingKey::from_secret(secret_key.as_bytes());
    let mut validation = Validation::default();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let token_data = decode::<SessionClaims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        // Everything else is structural: bad base64, wrong segment count,
        // missing claims, unexpected algorithm, undecodable payload
        _ => TokenError::Malformed(e.to_string()),
    })?;

    Ok(token_data.claims)
}
