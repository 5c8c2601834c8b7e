use serde_json::{json, Value};

use super::{decode_all, encode};
use crate::domain::models::Notification;
use crate::store::{Collection, RecordStore, StoreError};

const COLLECTION: Collection = Collection::Notifications;

pub(crate) async fn list_by_user(
    store: &dyn RecordStore,
    user_id: &str,
) -> Result<Vec<Notification>, StoreError> {
    decode_all(COLLECTION, store.get_where(COLLECTION, "user_id", &json!(user_id)).await?)
}

pub(crate) async fn insert(
    store: &dyn RecordStore,
    notification: &Notification,
) -> Result<(), StoreError> {
    store.insert(COLLECTION, encode(COLLECTION, notification)?).await?;
    Ok(())
}

pub(crate) async fn mark_all_read(
    store: &dyn RecordStore,
    user_id: &str,
) -> Result<(), StoreError> {
    let docs = store.get_where(COLLECTION, "user_id", &json!(user_id)).await?;
    for doc in docs {
        let Some(id) = doc.get("id").and_then(Value::as_str) else {
            continue;
        };
        store.update(COLLECTION, id, json!({"read": true})).await?;
    }
    Ok(())
}
