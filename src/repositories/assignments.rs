use serde_json::json;

use super::{decode, decode_all, encode};
use crate::domain::models::Assignment;
use crate::store::{Collection, RecordStore, StoreError};

const COLLECTION: Collection = Collection::Assignments;

pub(crate) async fn find_by_id(
    store: &dyn RecordStore,
    assignment_id: &str,
) -> Result<Option<Assignment>, StoreError> {
    store.get_by_id(COLLECTION, assignment_id).await?.map(|doc| decode(COLLECTION, doc)).transpose()
}

pub(crate) async fn list_by_course(
    store: &dyn RecordStore,
    course_id: &str,
) -> Result<Vec<Assignment>, StoreError> {
    decode_all(COLLECTION, store.get_where(COLLECTION, "course_id", &json!(course_id)).await?)
}

pub(crate) async fn insert(
    store: &dyn RecordStore,
    assignment: &Assignment,
) -> Result<(), StoreError> {
    store.insert(COLLECTION, encode(COLLECTION, assignment)?).await?;
    Ok(())
}
