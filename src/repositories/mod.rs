pub(crate) mod announcements;
pub(crate) mod assignments;
pub(crate) mod courses;
pub(crate) mod forum;
pub(crate) mod notifications;
pub(crate) mod reviews;
pub(crate) mod submissions;
pub(crate) mod users;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::store::{Collection, Document, StoreError};

pub(crate) fn decode<T: DeserializeOwned>(
    collection: Collection,
    doc: Document,
) -> Result<T, StoreError> {
    serde_json::from_value(Value::Object(doc))
        .map_err(|source| StoreError::Malformed { collection, source })
}

pub(crate) fn decode_all<T: DeserializeOwned>(
    collection: Collection,
    docs: Vec<Document>,
) -> Result<Vec<T>, StoreError> {
    docs.into_iter().map(|doc| decode(collection, doc)).collect()
}

pub(crate) fn encode<T: Serialize>(collection: Collection, entity: &T) -> Result<Value, StoreError> {
    serde_json::to_value(entity).map_err(|source| StoreError::Malformed { collection, source })
}
