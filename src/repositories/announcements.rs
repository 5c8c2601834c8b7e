use serde_json::json;

use super::{decode_all, encode};
use crate::domain::models::Announcement;
use crate::store::{Collection, RecordStore, StoreError};

const COLLECTION: Collection = Collection::Announcements;

pub(crate) async fn list_by_course(
    store: &dyn RecordStore,
    course_id: &str,
) -> Result<Vec<Announcement>, StoreError> {
    decode_all(COLLECTION, store.get_where(COLLECTION, "course_id", &json!(course_id)).await?)
}

pub(crate) async fn insert(
    store: &dyn RecordStore,
    announcement: &Announcement,
) -> Result<(), StoreError> {
    store.insert(COLLECTION, encode(COLLECTION, announcement)?).await?;
    Ok(())
}
