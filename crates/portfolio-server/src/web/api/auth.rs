use crate::login::LoginOutcome;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use portfolio_common::models::auth::{LoginRequest, LoginResponse};
use portfolio_common::validation::validate_login_request;
use serde_json::json;
use std::sync::Arc;

/// POST /api/auth/login
#[tracing::instrument(skip(state, body))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> impl IntoResponse {
    let req = match body {
        Ok(Json(req)) => req,
        Err(e) => {
            tracing::debug!("Rejected login body: {}", e);
            let error = format!("Invalid request: {}", e.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": error, "fields": {}})),
            )
                .into_response();
        }
    };

    if let Err(fields) = validate_login_request(&req) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Validation failed", "fields": fields})),
        )
            .into_response();
    }

    match state.auth.login(&req.email, &req.password).await {
        Ok(LoginOutcome::Success { token, user }) => Json(LoginResponse {
            token,
            user: user.profile(),
        })
        .into_response(),
        Ok(LoginOutcome::Failure) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid email or password"})),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Login error: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}
