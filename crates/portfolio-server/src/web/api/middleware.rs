use crate::state::AppState;
use crate::token::validate_token;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use portfolio_common::models::auth::Claims;
use serde_json::json;
use std::sync::Arc;

/// Extractor that validates a JWT Bearer token and provides the claims.
///
/// Every rejection produces the same 401 body; the cause is only logged.
#[derive(Debug)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Email the token was issued for
    pub fn email(&self) -> &str {
        &self.0.sub
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Invalid or missing token"})),
    )
        .into_response()
}

/// Token part of an `Authorization: Bearer <token>` value. The scheme name is
/// matched case-insensitively.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let token = match auth_header.and_then(bearer_token) {
            Some(t) => t,
            None => {
                tracing::debug!("Missing or malformed authorization header");
                return Err(unauthorized());
            }
        };

        match validate_token(token, &state.tokens) {
            Ok(claims) if !claims.sub.is_empty() => Ok(AuthUser(claims)),
            Ok(_) => {
                tracing::debug!("Token has an empty subject");
                Err(unauthorized())
            }
            Err(e) => {
                tracing::debug!("Token rejected: {}", e);
                Err(unauthorized())
            }
        }
    }
}
