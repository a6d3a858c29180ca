use anyhow::{Context, Result};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use portfolio_common::models::auth::Claims;
use std::sync::Arc;
use thiserror::Error;

use crate::config::JwtConfig;

/// Lifetime of an issued token
pub const TOKEN_TTL_SECS: i64 = 8 * 60 * 60;

/// Minimum HMAC key length in bytes (256 bits)
pub const MIN_SECRET_LEN: usize = 32;

/// Startup-time problems with the signing configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("jwt secret is empty")]
    EmptySecret,

    #[error("jwt secret is {actual} bytes, at least {minimum} required")]
    SecretTooShort { actual: usize, minimum: usize },
}

/// Why an inbound token was rejected.
///
/// Callers collapse all of these into one "unauthenticated" answer; the
/// variants exist for logs and tests.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("token not yet valid")]
    NotYetValid,

    #[error("token signature invalid")]
    SignatureInvalid,

    #[error("token issuer or audience mismatch")]
    IssuerAudienceMismatch,

    #[error("token malformed")]
    Malformed,
}

/// HMAC signing key, at least [`MIN_SECRET_LEN`] bytes
#[derive(Clone)]
pub struct SigningKey {
    bytes: Arc<[u8]>,
}

impl SigningKey {
    /// Build a key from the configured secret.
    ///
    /// Secrets shorter than 32 bytes are right-padded with zero bytes so that
    /// existing deployments with short secrets keep working. Padding adds no
    /// entropy; set `strict` to refuse such secrets instead.
    pub fn from_secret(secret: &str, strict: bool) -> Result<Self, KeyError> {
        let raw = secret.as_bytes();
        if raw.is_empty() {
            return Err(KeyError::EmptySecret);
        }
        if raw.len() >= MIN_SECRET_LEN {
            return Ok(Self {
                bytes: Arc::from(raw),
            });
        }
        if strict {
            return Err(KeyError::SecretTooShort {
                actual: raw.len(),
                minimum: MIN_SECRET_LEN,
            });
        }

        tracing::warn!(
            "JWT secret is {} bytes; padding to {} bytes. Configure a longer secret.",
            raw.len(),
            MIN_SECRET_LEN
        );
        let mut padded = raw.to_vec();
        padded.resize(MIN_SECRET_LEN, 0);
        Ok(Self {
            bytes: Arc::from(padded),
        })
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(&self.bytes)
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(&self.bytes)
    }
}

/// Immutable issuer/audience/key triple shared by issuance and validation
#[derive(Clone)]
pub struct TokenConfig {
    pub issuer: String,
    pub audience: String,
    pub key: SigningKey,
}

impl TokenConfig {
    pub fn new(
        issuer: impl Into<String>,
        audience: impl Into<String>,
        secret: &str,
        strict: bool,
    ) -> Result<Self, KeyError> {
        Ok(Self {
            issuer: issuer.into(),
            audience: audience.into(),
            key: SigningKey::from_secret(secret, strict)?,
        })
    }

    pub fn from_config(config: &JwtConfig) -> Result<Self, KeyError> {
        Self::new(
            config.issuer.clone(),
            config.audience.clone(),
            &config.secret,
            config.reject_short_secret,
        )
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        // Lifetime is checked against an explicit `now` in validate_token_at
        validation.validate_exp = false;
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation
    }
}

/// Issue a token for `email`, valid for eight hours from now
pub fn issue_token(email: &str, config: &TokenConfig) -> Result<String> {
    issue_token_at(email, config, chrono::Utc::now().timestamp())
}

/// Issue a token as if the current unix time were `now`
pub fn issue_token_at(email: &str, config: &TokenConfig, now: i64) -> Result<String> {
    let claims = Claims {
        sub: email.to_string(),
        email: Some(email.to_string()),
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        iat: now,
        exp: now + TOKEN_TTL_SECS,
    };
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &config.key.encoding_key(),
    )
    .context("Failed to sign token")
}

/// Validate a token against the current time and return its claims.
///
/// Signature, issuer, audience and lifetime are all checked, with no
/// clock-skew allowance.
pub fn validate_token(token: &str, config: &TokenConfig) -> Result<Claims, TokenError> {
    validate_token_at(token, config, chrono::Utc::now().timestamp())
}

/// Validate a token as if the current unix time were `now`.
///
/// Valid for `iat <= now < exp`.
pub fn validate_token_at(
    token: &str,
    config: &TokenConfig,
    now: i64,
) -> Result<Claims, TokenError> {
    let data =
        jsonwebtoken::decode::<Claims>(token, &config.key.decoding_key(), &config.validation())
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => {
                    TokenError::IssuerAudienceMismatch
                }
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::ImmatureSignature => TokenError::NotYetValid,
                _ => TokenError::Malformed,
            })?;

    let claims = data.claims;
    if now < claims.iat {
        return Err(TokenError::NotYetValid);
    }
    if now >= claims.exp {
        return Err(TokenError::Expired);
    }
    Ok(claims)
}
