//! Signed JWTs for sessions, password resets and email confirmation.
//!
//! All three share one claim shape and one secret. The `typ` claim keeps a token minted for one
//! purpose from being accepted for another; a password reset link can't be used as a login.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use crate::{config::Config, errors::Error, types::UserId};

pub const ISSUER: &str = "brewchemy";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Bearer token for API access; `sub` is the user id
    Access,
    /// Password reset link; `sub` is the email
    PwdReset,
    /// Account confirmation link; `sub` is the email
    EmailConfirm,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub typ: TokenType,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(sub: impl Into<String>, typ: TokenType, ttl: Duration) -> Self {
        let now = Utc::now();
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        let exp = now.checked_add_signed(ttl).unwrap_or(chrono::DateTime::<Utc>::MAX_UTC);

        Self {
            sub: sub.into(),
            typ,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }
}

#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token")]
    Invalid,
    #[error("Invalid token type")]
    WrongType,
    #[error("token signing unavailable: {0}")]
    Internal(String),
}

/// Token problems on protected routes are authentication failures.
impl From<TokenError> for Error {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Internal(operation) => Error::Internal { operation },
            other => Error::Unauthenticated {
                message: Some(other.to_string()),
            },
        }
    }
}

impl TokenError {
    /// For link tokens (confirmation, password reset) a bad token is a bad request, not a 401.
    pub fn into_bad_request(self) -> Error {
        match self {
            TokenError::Internal(operation) => Error::Internal { operation },
            other => Error::BadRequest { message: other.to_string() },
        }
    }
}

fn secret(config: &Config) -> Result<&[u8], TokenError> {
    config
        .secret_key
        .as_deref()
        .map(str::as_bytes)
        .ok_or_else(|| TokenError::Internal("secret_key is required to sign tokens".to_string()))
}

pub fn create_token(sub: impl Into<String>, typ: TokenType, ttl: Duration, config: &Config) -> Result<String, TokenError> {
    let claims = Claims::new(sub, typ, ttl);
    let key = EncodingKey::from_secret(secret(config)?);
    encode(&Header::default(), &claims, &key).map_err(|e| TokenError::Internal(format!("create JWT: {e}")))
}

pub fn create_access_token(user_id: UserId, config: &Config) -> Result<String, TokenError> {
    create_token(user_id.to_string(), TokenType::Access, config.auth.security.jwt_expiry, config)
}

pub fn create_password_reset_token(email: &str, config: &Config) -> Result<String, TokenError> {
    create_token(
        email,
        TokenType::PwdReset,
        config.auth.native.password_reset_token_duration,
        config,
    )
}

pub fn create_email_confirmation_token(email: &str, config: &Config) -> Result<String, TokenError> {
    create_token(
        email,
        TokenType::EmailConfirm,
        config.auth.native.email_confirmation_token_duration,
        config,
    )
}

/// Check signature, issuer, expiry and purpose.
pub fn verify_token(token: &str, expected: TokenType, config: &Config) -> Result<Claims, TokenError> {
    let key = DecodingKey::from_secret(secret(config)?);
    let mut validation = Validation::default();
    validation.set_issuer(&[ISSUER]);
    validation.leeway = 0;

    let data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidKeyFormat | ErrorKind::InvalidEcdsaKey | ErrorKind::InvalidRsaKey(_) | ErrorKind::Crypto(_) => {
            TokenError::Internal(format!("JWT verification: {e}"))
        }
        _ => TokenError::Invalid,
    })?;

    if data.claims.typ != expected {
        return Err(TokenError::WrongType);
    }
    Ok(data.claims)
}

/// Verify an access token and return the user id it was issued for.
pub fn verify_access_token(token: &str, config: &Config) -> Result<UserId, TokenError> {
    let claims = verify_token(token, TokenType::Access, config)?;
    claims.sub.parse().map_err(|_| TokenError::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> Config {
        Config {
            secret_key: Some("test-secret-key-for-jwt".to_string()),
            ..Default::default()
        }
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn test_access_token_roundtrip() {
        let config = create_test_config();
        let token = create_access_token(42, &config).unwrap();

        assert_eq!(verify_access_token(&token, &config).unwrap(), 42);
    }

    #[test]
    fn test_email_tokens_carry_email() {
        let config = create_test_config();

        let token = create_password_reset_token("brewer@example.com", &config).unwrap();
        let claims = verify_token(&token, TokenType::PwdReset, &config).unwrap();
        assert_eq!(claims.sub, "brewer@example.com");
        assert_eq!(claims.iss, ISSUER);

        let token = create_email_confirmation_token("brewer@example.com", &config).unwrap();
        let claims = verify_token(&token, TokenType::EmailConfirm, &config).unwrap();
        assert_eq!(claims.typ, TokenType::EmailConfirm);
        assert!(claims.exp - claims.iat >= 47 * 60 * 60);
    }

    #[test]
    fn test_wrong_type_rejected() {
        let config = create_test_config();
        let reset = create_password_reset_token("brewer@example.com", &config).unwrap();

        assert_eq!(verify_access_token(&reset, &config), Err(TokenError::WrongType));

        let access = create_access_token(1, &config).unwrap();
        assert_eq!(
            verify_token(&access, TokenType::EmailConfirm, &config).unwrap_err(),
            TokenError::WrongType
        );
    }

    #[test]
    fn test_expired_token() {
        let config = create_test_config();
        let now = Utc::now();
        let claims = Claims {
            sub: "7".to_string(),
            typ: TokenType::Access,
            iss: ISSUER.to_string(),
            iat: (now - chrono::Duration::hours(2)).timestamp(),
            exp: (now - chrono::Duration::hours(1)).timestamp(),
        };
        let token = sign(&claims, "test-secret-key-for-jwt");

        let err = verify_access_token(&token, &config).unwrap_err();
        assert_eq!(err, TokenError::Expired);
        assert_eq!(err.to_string(), "Token has expired");
    }

    #[test]
    fn test_tampered_and_foreign_tokens() {
        let config = create_test_config();

        let foreign = create_access_token(1, &Config {
            secret_key: Some("different-secret".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(verify_access_token(&foreign, &config), Err(TokenError::Invalid));

        let mut tampered = create_access_token(1, &config).unwrap();
        tampered.push('x');
        assert_eq!(verify_access_token(&tampered, &config), Err(TokenError::Invalid));

        for token in ["not.a.token", "invalid", "", "too.many.parts.in.this.token"] {
            assert_eq!(verify_access_token(token, &config), Err(TokenError::Invalid), "token: {token}");
        }
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let config = create_test_config();
        let mut claims = Claims::new("1", TokenType::Access, Duration::from_secs(60));
        claims.iss = "someone-else".to_string();
        let token = sign(&claims, "test-secret-key-for-jwt");

        assert_eq!(verify_access_token(&token, &config), Err(TokenError::Invalid));
    }

    #[test]
    fn test_non_numeric_subject_rejected() {
        let config = create_test_config();
        let token = create_token("brewer@example.com", TokenType::Access, Duration::from_secs(60), &config).unwrap();

        assert_eq!(verify_access_token(&token, &config), Err(TokenError::Invalid));
    }

    #[test]
    fn test_error_mapping() {
        let err: Error = TokenError::Expired.into();
        assert_eq!(err.status_code(), axum::http::StatusCode::UNAUTHORIZED);
        assert_eq!(err.user_message(), "Token has expired");

        let err = TokenError::Invalid.into_bad_request();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.user_message(), "Invalid token");
    }

    #[test]
    fn test_missing_secret_is_internal() {
        let config = Config {
            secret_key: None,
            ..Default::default()
        };
        assert!(matches!(create_access_token(1, &config), Err(TokenError::Internal(_))));
    }
}
