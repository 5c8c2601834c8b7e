use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::{announcements, forum, reviews};
use crate::core::state::AppState;
use crate::domain::models::{Assignment, Module, StudyMaterial, Video};
use crate::repositories;
use crate::schemas::assignment::AssignmentCreate;
use crate::schemas::course::{
    CourseCreate, CourseResponse, EnrollRequest, ModuleCreate, StudyMaterialCreate, VideoCreate,
};
use crate::schemas::user::UserResponse;
use crate::services::{catalog, content, enrollment};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route("/:course_id", get(get_course))
        .route("/:course_id/enroll", post(enroll))
        .route("/:course_id/students", get(enrolled_students))
        .route("/:course_id/assignments", get(list_assignments).post(create_assignment))
        .route(
            "/:course_id/announcements",
            get(announcements::list_for_course).post(announcements::create),
        )
        .route("/:course_id/reviews", get(reviews::list_for_course).post(reviews::create))
        .route("/:course_id/threads", get(forum::list_for_course).post(forum::create_thread))
        .route("/:course_id/modules", post(create_module))
        .route("/:course_id/modules/:module_id/videos", post(add_video))
        .route("/:course_id/modules/:module_id/materials", post(add_study_material))
}

async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let views = catalog::list_courses(state.store()).await?;
    Ok(Json(views.into_iter().map(CourseResponse::from_view).collect()))
}

async fn create_course(
    State(state): State<AppState>,
    Json(payload): Json<CourseCreate>,
) -> Result<(axum::http::StatusCode, Json<CourseResponse>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let course = content::create_course(
        state.store(),
        &payload.title,
        &payload.description,
        &payload.duration,
        &payload.teacher_id,
        payload.prerequisites,
    )
    .await?;

    let view = catalog::hydrate_course(state.store(), course, None).await?;
    Ok((axum::http::StatusCode::CREATED, Json(CourseResponse::from_view(view))))
}

async fn get_course(
    Path(course_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CourseResponse>, ApiError> {
    let view = catalog::course_view(state.store(), &course_id).await?;
    Ok(Json(CourseResponse::from_view(view)))
}

async fn enroll(
    Path(course_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<EnrollRequest>,
) -> Result<Json<CourseResponse>, ApiError> {
    let course = enrollment::enroll(state.store(), &course_id, &payload.student_id).await?;
    let view = catalog::hydrate_course(state.store(), course, Some(&payload.student_id)).await?;
    Ok(Json(CourseResponse::from_view(view)))
}

async fn enrolled_students(
    Path(course_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let students = catalog::enrolled_students(state.store(), &course_id).await?;
    Ok(Json(students.into_iter().map(UserResponse::from_domain).collect()))
}

async fn list_assignments(
    Path(course_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Assignment>>, ApiError> {
    let assignments = repositories::assignments::list_by_course(state.store(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list assignments"))?;
    Ok(Json(assignments))
}

async fn create_assignment(
    Path(course_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<AssignmentCreate>,
) -> Result<(axum::http::StatusCode, Json<Assignment>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let assignment = content::create_assignment(
        state.store(),
        &course_id,
        &payload.title,
        &payload.description,
        payload.deadline,
    )
    .await?;
    Ok((axum::http::StatusCode::CREATED, Json(assignment)))
}

async fn create_module(
    Path(course_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<ModuleCreate>,
) -> Result<(axum::http::StatusCode, Json<Module>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let module = content::create_module(state.store(), &course_id, &payload.title).await?;
    Ok((axum::http::StatusCode::CREATED, Json(module)))
}

async fn add_video(
    Path((course_id, module_id)): Path<(String, String)>,
    State(state): State<AppState>,
    Json(payload): Json<VideoCreate>,
) -> Result<(axum::http::StatusCode, Json<Video>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let video =
        content::add_video(state.store(), &course_id, &module_id, &payload.title, &payload.url)
            .await?;
    Ok((axum::http::StatusCode::CREATED, Json(video)))
}

async fn add_study_material(
    Path((course_id, module_id)): Path<(String, String)>,
    State(state): State<AppState>,
    Json(payload): Json<StudyMaterialCreate>,
) -> Result<(axum::http::StatusCode, Json<StudyMaterial>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let material = content::add_study_material(
        state.store(),
        &course_id,
        &module_id,
        &payload.title,
        &payload.file_name,
    )
    .await?;
    Ok((axum::http::StatusCode::CREATED, Json(material)))
}
