use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::models::{Reply, Thread};
use crate::repositories;
use crate::services::errors::DomainError;
use crate::services::notifications::{self, DomainEvent};
use crate::store::RecordStore;

pub(crate) async fn create_thread(
    store: &dyn RecordStore,
    course_id: &str,
    title: &str,
    content: &str,
    author_id: &str,
    now: OffsetDateTime,
) -> Result<Thread, DomainError> {
    let title = title.trim();
    let content = content.trim();
    if title.is_empty() || content.is_empty() {
        return Err(DomainError::validation("Thread title and content must not be empty"));
    }

    let author = repositories::users::find_by_id(store, author_id)
        .await?
        .ok_or(DomainError::NotFound("User"))?;
    let course = repositories::courses::find_by_id(store, course_id)
        .await?
        .ok_or(DomainError::NotFound("Course"))?;

    let thread = Thread {
        id: Uuid::new_v4().to_string(),
        course_id: course.id.clone(),
        title: title.to_string(),
        content: content.to_string(),
        author_id: author.id.clone(),
        author_name: author.name.clone(),
        created_at: now,
    };
    repositories::forum::insert_thread(store, &thread).await?;

    notifications::publish(
        store,
        DomainEvent::ThreadCreated { course: &course, thread: &thread, author: &author },
    )
    .await;
    tracing::info!(
        course_id = %course.id,
        thread_id = %thread.id,
        author_id = %author.id,
        action = "thread_create",
        "Discussion thread created"
    );
    Ok(thread)
}

pub(crate) async fn create_reply(
    store: &dyn RecordStore,
    thread_id: &str,
    content: &str,
    author_id: &str,
    now: OffsetDateTime,
) -> Result<Reply, DomainError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(DomainError::validation("Reply content must not be empty"));
    }

    let author = repositories::users::find_by_id(store, author_id)
        .await?
        .ok_or(DomainError::NotFound("User"))?;
    let thread = repositories::forum::find_thread(store, thread_id)
        .await?
        .ok_or(DomainError::NotFound("Thread"))?;
    let course = repositories::courses::find_by_id(store, &thread.course_id)
        .await?
        .ok_or(DomainError::NotFound("Course"))?;

    let reply = Reply {
        id: Uuid::new_v4().to_string(),
        thread_id: thread.id.clone(),
        content: content.to_string(),
        author_id: author.id.clone(),
        author_name: author.name.clone(),
        created_at: now,
    };
    repositories::forum::insert_reply(store, &reply).await?;

    notifications::publish(
        store,
        DomainEvent::ReplyCreated { course: &course, thread: &thread, author: &author },
    )
    .await;
    tracing::info!(
        thread_id = %thread.id,
        reply_id = %reply.id,
        author_id = %author.id,
        action = "reply_create",
        "Reply posted"
    );
    Ok(reply)
}
