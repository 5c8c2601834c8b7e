use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::core::time::now_utc;
use crate::repositories;
use crate::schemas::review::{ReviewCreate, ReviewResponse};
use crate::services::reviews;

pub(super) async fn list_for_course(
    Path(course_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let mut course_reviews = repositories::reviews::list_by_course(state.store(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list reviews"))?;
    course_reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(course_reviews.into_iter().map(ReviewResponse::from_domain).collect()))
}

pub(super) async fn create(
    Path(course_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<ReviewCreate>,
) -> Result<(axum::http::StatusCode, Json<ReviewResponse>), ApiError> {
    let review = reviews::create_review(
        state.store(),
        &course_id,
        &payload.student_id,
        payload.rating,
        &payload.comment,
        now_utc(),
    )
    .await?;
    Ok((axum::http::StatusCode::CREATED, Json(ReviewResponse::from_domain(review))))
}
