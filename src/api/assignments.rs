use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::domain::models::Assignment;
use crate::repositories;
use crate::schemas::submission::{SubmissionResponse, SubmitRequest};
use crate::services::{catalog, submissions};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/:assignment_id", get(get_assignment))
        .route("/:assignment_id/submissions", get(list_submissions).post(submit))
}

async fn get_assignment(
    Path(assignment_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Assignment>, ApiError> {
    let assignment = repositories::assignments::find_by_id(state.store(), &assignment_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch assignment"))?
        .ok_or_else(|| ApiError::NotFound("Assignment not found".to_string()))?;

    Ok(Json(assignment))
}

async fn list_submissions(
    Path(assignment_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<SubmissionResponse>>, ApiError> {
    let views = catalog::submissions_for_assignment(state.store(), &assignment_id).await?;
    Ok(Json(views.into_iter().map(SubmissionResponse::with_student).collect()))
}

async fn submit(
    Path(assignment_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<SubmitRequest>,
) -> Result<(axum::http::StatusCode, Json<SubmissionResponse>), ApiError> {
    let submission = submissions::submit_assignment(
        state.store(),
        &assignment_id,
        &payload.student_id,
        payload.content.as_deref(),
        payload.file_name.as_deref(),
    )
    .await?;
    Ok((axum::http::StatusCode::CREATED, Json(SubmissionResponse::from_domain(submission))))
}
