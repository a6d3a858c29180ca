pub mod auth;
pub mod certificates;
pub mod middleware;
pub mod users;

use crate::state::AppState;
use axum::response::IntoResponse;
use axum::{routing::get, routing::post, Json, Router};
use serde_json::json;
use std::sync::Arc;

/// GET /api/health -- liveness probe, no auth
async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

pub fn build_api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        // Auth routes
        .route("/auth/login", post(auth::login))
        // Authenticated routes
        .route("/users/me", get(users::me))
        .route("/certificates", get(certificates::list_mine))
        .with_state(state)
}
