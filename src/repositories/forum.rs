use serde_json::json;

use super::{decode, decode_all, encode};
use crate::domain::models::{Reply, Thread};
use crate::store::{Collection, RecordStore, StoreError};

pub(crate) async fn find_thread(
    store: &dyn RecordStore,
    thread_id: &str,
) -> Result<Option<Thread>, StoreError> {
    store
        .get_by_id(Collection::Threads, thread_id)
        .await?
        .map(|doc| decode(Collection::Threads, doc))
        .transpose()
}

pub(crate) async fn threads_by_course(
    store: &dyn RecordStore,
    course_id: &str,
) -> Result<Vec<Thread>, StoreError> {
    decode_all(
        Collection::Threads,
        store.get_where(Collection::Threads, "course_id", &json!(course_id)).await?,
    )
}

pub(crate) async fn insert_thread(
    store: &dyn RecordStore,
    thread: &Thread,
) -> Result<(), StoreError> {
    store.insert(Collection::Threads, encode(Collection::Threads, thread)?).await?;
    Ok(())
}

pub(crate) async fn replies_by_thread(
    store: &dyn RecordStore,
    thread_id: &str,
) -> Result<Vec<Reply>, StoreError> {
    decode_all(
        Collection::Replies,
        store.get_where(Collection::Replies, "thread_id", &json!(thread_id)).await?,
    )
}

pub(crate) async fn count_replies(
    store: &dyn RecordStore,
    thread_id: &str,
) -> Result<usize, StoreError> {
    Ok(store.get_where(Collection::Replies, "thread_id", &json!(thread_id)).await?.len())
}

pub(crate) async fn insert_reply(store: &dyn RecordStore, reply: &Reply) -> Result<(), StoreError> {
    store.insert(Collection::Replies, encode(Collection::Replies, reply)?).await?;
    Ok(())
}
