use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::notifications;
use crate::core::state::AppState;
use crate::core::time::now_utc;
use crate::repositories;
use crate::schemas::announcement::AnnouncementResponse;
use crate::schemas::course::CourseResponse;
use crate::schemas::submission::SubmissionResponse;
use crate::schemas::user::{ProfileUpdateRequest, RegisterRequest, UserResponse};
use crate::services::{accounts, catalog};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(register))
        .route("/:user_id", get(get_user).patch(update_profile))
        .route("/:user_id/login", post(login))
        .route("/:user_id/courses", get(enrolled_courses))
        .route("/:user_id/teaching", get(teaching_courses))
        .route("/:user_id/submissions", get(student_submissions))
        .route("/:user_id/announcements", get(student_announcements))
        .route("/:user_id/notifications", get(notifications::list_for_user))
        .route("/:user_id/notifications/read", post(notifications::mark_all_read))
}

async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(axum::http::StatusCode, Json<UserResponse>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let user =
        accounts::register(state.store(), &payload.name, &payload.email, payload.role).await?;
    Ok((axum::http::StatusCode::CREATED, Json(UserResponse::from_domain(user))))
}

async fn get_user(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = repositories::users::find_by_id(state.store(), &user_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch user"))?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse::from_domain(user)))
}

async fn update_profile(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<ProfileUpdateRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let user =
        accounts::update_profile(state.store(), &user_id, &payload.name, &payload.email).await?;
    Ok(Json(UserResponse::from_domain(user)))
}

/// Records a login and returns the user with any streak/badge changes
/// applied. For teachers this is a plain lookup.
async fn login(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = accounts::record_login(state.store(), &user_id, now_utc()).await?;
    Ok(Json(UserResponse::from_domain(user)))
}

async fn enrolled_courses(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let views = catalog::courses_for_student(state.store(), &user_id).await?;
    Ok(Json(views.into_iter().map(CourseResponse::from_view).collect()))
}

async fn teaching_courses(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let views = catalog::courses_for_teacher(state.store(), &user_id).await?;
    Ok(Json(views.into_iter().map(CourseResponse::from_view).collect()))
}

async fn student_submissions(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<SubmissionResponse>>, ApiError> {
    let enriched = catalog::enriched_submissions(state.store(), &user_id).await?;
    Ok(Json(enriched.into_iter().map(SubmissionResponse::enriched).collect()))
}

async fn student_announcements(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<AnnouncementResponse>>, ApiError> {
    let views = catalog::announcements_for_student(state.store(), &user_id).await?;
    Ok(Json(views.into_iter().map(AnnouncementResponse::from_view).collect()))
}
