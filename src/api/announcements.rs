use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::core::time::now_utc;
use crate::repositories;
use crate::schemas::announcement::{AnnouncementCreate, AnnouncementResponse};
use crate::services::content;

pub(super) async fn list_for_course(
    Path(course_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<AnnouncementResponse>>, ApiError> {
    let mut announcements = repositories::announcements::list_by_course(state.store(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list announcements"))?;
    announcements.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(announcements.into_iter().map(AnnouncementResponse::from_domain).collect()))
}

pub(super) async fn create(
    Path(course_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<AnnouncementCreate>,
) -> Result<(axum::http::StatusCode, Json<AnnouncementResponse>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let announcement = content::create_announcement(
        state.store(),
        &course_id,
        &payload.title,
        &payload.content,
        now_utc(),
    )
    .await?;
    Ok((axum::http::StatusCode::CREATED, Json(AnnouncementResponse::from_domain(announcement))))
}
