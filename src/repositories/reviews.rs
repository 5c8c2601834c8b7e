use serde_json::json;

use super::{decode_all, encode};
use crate::domain::models::Review;
use crate::store::{Collection, RecordStore, StoreError};

const COLLECTION: Collection = Collection::Reviews;

pub(crate) async fn list_by_course(
    store: &dyn RecordStore,
    course_id: &str,
) -> Result<Vec<Review>, StoreError> {
    decode_all(COLLECTION, store.get_where(COLLECTION, "course_id", &json!(course_id)).await?)
}

pub(crate) async fn find_for_pair(
    store: &dyn RecordStore,
    course_id: &str,
    student_id: &str,
) -> Result<Option<Review>, StoreError> {
    let reviews = list_by_course(store, course_id).await?;
    Ok(reviews.into_iter().find(|review| review.student_id == student_id))
}

pub(crate) async fn insert(store: &dyn RecordStore, review: &Review) -> Result<(), StoreError> {
    store.insert(COLLECTION, encode(COLLECTION, review)?).await?;
    Ok(())
}
