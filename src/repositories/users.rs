use serde_json::json;
use time::OffsetDateTime;

use super::{decode, encode};
use crate::core::time::format_timestamp;
use crate::domain::models::{Badge, User};
use crate::store::{Collection, RecordStore, StoreError};

const COLLECTION: Collection = Collection::Users;

pub(crate) async fn find_by_id(
    store: &dyn RecordStore,
    user_id: &str,
) -> Result<Option<User>, StoreError> {
    store.get_by_id(COLLECTION, user_id).await?.map(|doc| decode(COLLECTION, doc)).transpose()
}

pub(crate) async fn find_by_email(
    store: &dyn RecordStore,
    email: &str,
) -> Result<Option<User>, StoreError> {
    let docs = store.get_where(COLLECTION, "email", &json!(email)).await?;
    docs.into_iter().next().map(|doc| decode(COLLECTION, doc)).transpose()
}

pub(crate) async fn insert(store: &dyn RecordStore, user: &User) -> Result<(), StoreError> {
    store.insert(COLLECTION, encode(COLLECTION, user)?).await?;
    Ok(())
}

pub(crate) async fn update_profile(
    store: &dyn RecordStore,
    user_id: &str,
    name: &str,
    email: &str,
) -> Result<(), StoreError> {
    store.update(COLLECTION, user_id, json!({"name": name, "email": email})).await
}

pub(crate) async fn update_login(
    store: &dyn RecordStore,
    user_id: &str,
    last_login: OffsetDateTime,
    login_streak: u32,
    badges: &[Badge],
) -> Result<(), StoreError> {
    store
        .update(
            COLLECTION,
            user_id,
            json!({
                "last_login": format_timestamp(last_login),
                "login_streak": login_streak,
                "badges": badges,
            }),
        )
        .await
}
