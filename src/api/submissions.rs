use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::schemas::submission::{GradeRequest, SubmissionResponse};
use crate::services::submissions;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/:submission_id/grade", post(grade))
}

async fn grade(
    Path(submission_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<GradeRequest>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let submission = submissions::grade_submission(
        state.store(),
        &submission_id,
        payload.internal,
        payload.external,
        payload.letter_grade.as_deref(),
        payload.review.as_deref(),
    )
    .await?;
    Ok(Json(SubmissionResponse::from_domain(submission)))
}
