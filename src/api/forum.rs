use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use validator::Validate;

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::core::time::now_utc;
use crate::repositories;
use crate::schemas::forum::{ReplyCreate, ReplyResponse, ThreadCreate, ThreadResponse};
use crate::services::{catalog, forum};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/:thread_id", get(get_thread))
        .route("/:thread_id/replies", get(list_replies).post(create_reply))
}

pub(super) async fn list_for_course(
    Path(course_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ThreadResponse>>, ApiError> {
    let views = catalog::threads_for_course(state.store(), &course_id).await?;
    Ok(Json(views.into_iter().map(ThreadResponse::from_view).collect()))
}

pub(super) async fn create_thread(
    Path(course_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<ThreadCreate>,
) -> Result<(axum::http::StatusCode, Json<ThreadResponse>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let thread = forum::create_thread(
        state.store(),
        &course_id,
        &payload.title,
        &payload.content,
        &payload.author_id,
        now_utc(),
    )
    .await?;
    let view = catalog::thread_view(state.store(), &thread.id).await?;
    Ok((axum::http::StatusCode::CREATED, Json(ThreadResponse::from_view(view))))
}

async fn get_thread(
    Path(thread_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ThreadResponse>, ApiError> {
    let view = catalog::thread_view(state.store(), &thread_id).await?;
    Ok(Json(ThreadResponse::from_view(view)))
}

async fn list_replies(
    Path(thread_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ReplyResponse>>, ApiError> {
    let mut replies = repositories::forum::replies_by_thread(state.store(), &thread_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list replies"))?;
    replies.sort_by(|a, b| a.created_at.cmp(&b.created_at));

    Ok(Json(replies.into_iter().map(ReplyResponse::from_domain).collect()))
}

async fn create_reply(
    Path(thread_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<ReplyCreate>,
) -> Result<(axum::http::StatusCode, Json<ReplyResponse>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let reply = forum::create_reply(
        state.store(),
        &thread_id,
        &payload.content,
        &payload.author_id,
        now_utc(),
    )
    .await?;
    Ok((axum::http::StatusCode::CREATED, Json(ReplyResponse::from_domain(reply))))
}
