use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::notification::NotificationResponse;

pub(super) async fn list_for_user(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<NotificationResponse>>, ApiError> {
    let mut notifications = repositories::notifications::list_by_user(state.store(), &user_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list notifications"))?;
    notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(notifications.into_iter().map(NotificationResponse::from_domain).collect()))
}

pub(super) async fn mark_all_read(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    repositories::notifications::mark_all_read(state.store(), &user_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to mark notifications as read"))?;

    Ok(StatusCode::NO_CONTENT)
}
