use crate::state::AppState;
use crate::web::api::middleware::AuthUser;
use crate::web::api::users::current_user;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

/// GET /api/certificates -- certificates owned by the caller
#[tracing::instrument(skip(state, auth))]
pub async fn list_mine(State(state): State<Arc<AppState>>, auth: AuthUser) -> impl IntoResponse {
    let user = match current_user(&state, &auth).await {
        Ok(user) => user,
        Err(response) => return response,
    };

    match state.certificates.list_for_user(user.id).await {
        Ok(certificates) => Json(certificates).into_response(),
        Err(e) => {
            tracing::error!("Failed to list certificates: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}
