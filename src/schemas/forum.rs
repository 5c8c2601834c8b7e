use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_timestamp;
use crate::domain::models::Reply;
use crate::services::catalog::ThreadView;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct ThreadCreate {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub(crate) title: String,
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub(crate) content: String,
    pub(crate) author_id: String,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct ReplyCreate {
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub(crate) content: String,
    pub(crate) author_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ThreadResponse {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author_id: String,
    pub(crate) author_name: String,
    pub(crate) created_at: String,
    pub(crate) reply_count: usize,
}

impl ThreadResponse {
    pub(crate) fn from_view(view: ThreadView) -> Self {
        Self {
            id: view.thread.id,
            course_id: view.thread.course_id,
            title: view.thread.title,
            content: view.thread.content,
            author_id: view.thread.author_id,
            author_name: view.thread.author_name,
            created_at: format_timestamp(view.thread.created_at),
            reply_count: view.reply_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ReplyResponse {
    pub(crate) id: String,
    pub(crate) thread_id: String,
    pub(crate) content: String,
    pub(crate) author_id: String,
    pub(crate) author_name: String,
    pub(crate) created_at: String,
}

impl ReplyResponse {
    pub(crate) fn from_domain(reply: Reply) -> Self {
        Self {
            id: reply.id,
            thread_id: reply.thread_id,
            content: reply.content,
            author_id: reply.author_id,
            author_name: reply.author_name,
            created_at: format_timestamp(reply.created_at),
        }
    }
}
