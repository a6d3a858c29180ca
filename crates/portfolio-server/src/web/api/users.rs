use crate::state::AppState;
use crate::store::UserRecord;
use crate::web::api::middleware::AuthUser;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Load the record behind an authenticated request.
///
/// A valid token whose subject has since been removed yields 404.
pub(crate) async fn current_user(
    state: &AppState,
    auth: &AuthUser,
) -> Result<UserRecord, Response> {
    match state.users.find_by_email(auth.email()).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({"error": "User not found"})),
        )
            .into_response()),
        Err(e) => {
            tracing::error!("Failed to get user: {:#}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response())
        }
    }
}

/// GET /api/users/me
#[tracing::instrument(skip(state, auth))]
pub async fn me(State(state): State<Arc<AppState>>, auth: AuthUser) -> impl IntoResponse {
    match current_user(&state, &auth).await {
        Ok(user) => Json(user.profile()).into_response(),
        Err(response) => response,
    }
}
