use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::store::{Collection, Document, RecordStore, StoreError};

/// In-memory document store. Collections are id-keyed maps; iteration order
/// is insertion-id order, callers sort by their own fields.
#[derive(Default)]
pub(crate) struct MemoryStore {
    collections: RwLock<HashMap<Collection, BTreeMap<String, Document>>>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().expect("store lock poisoned");
        Ok(collections.get(&collection).and_then(|records| records.get(id)).cloned())
    }

    async fn get_where(
        &self,
        collection: Collection,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().expect("store lock poisoned");
        let Some(records) = collections.get(&collection) else {
            return Ok(Vec::new());
        };
        Ok(records.values().filter(|doc| field_matches(doc, field, value)).cloned().collect())
    }

    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().expect("store lock poisoned");
        Ok(collections.get(&collection).map(|records| records.values().cloned().collect()).unwrap_or_default())
    }

    async fn insert(&self, collection: Collection, data: Value) -> Result<String, StoreError> {
        let Value::Object(mut doc) = data else {
            return Err(StoreError::NotAnObject { collection });
        };

        let id = match doc.get("id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                let id = Uuid::new_v4().to_string();
                doc.insert("id".to_string(), Value::String(id.clone()));
                id
            }
        };

        let mut collections = self.collections.write().expect("store lock poisoned");
        collections.entry(collection).or_default().insert(id.clone(), doc);
        Ok(id)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: Value,
    ) -> Result<(), StoreError> {
        let Value::Object(patch) = patch else {
            return Err(StoreError::NotAnObject { collection });
        };

        let mut collections = self.collections.write().expect("store lock poisoned");
        let record = collections
            .get_mut(&collection)
            .and_then(|records| records.get_mut(id))
            .ok_or_else(|| StoreError::RecordNotFound { collection, id: id.to_string() })?;

        for (field, value) in patch {
            record.insert(field, value);
        }
        Ok(())
    }

    async fn append_child(
        &self,
        collection: Collection,
        parent_id: &str,
        child_field: &str,
        data: Value,
    ) -> Result<String, StoreError> {
        let Value::Object(mut child) = data else {
            return Err(StoreError::NotAnObject { collection });
        };

        let id = match child.get("id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                let id = Uuid::new_v4().to_string();
                child.insert("id".to_string(), Value::String(id.clone()));
                id
            }
        };

        let mut collections = self.collections.write().expect("store lock poisoned");
        let record = collections
            .get_mut(&collection)
            .and_then(|records| records.get_mut(parent_id))
            .ok_or_else(|| StoreError::RecordNotFound {
                collection,
                id: parent_id.to_string(),
            })?;

        let target = resolve_child_array(record, child_field).ok_or_else(|| {
            StoreError::ChildPathNotFound {
                collection,
                id: parent_id.to_string(),
                path: child_field.to_string(),
            }
        })?;
        target.push(Value::Object(child));
        Ok(id)
    }
}

fn field_matches(doc: &Document, field: &str, value: &Value) -> bool {
    match doc.get(field) {
        Some(Value::Array(items)) => items.contains(value),
        Some(stored) => stored == value,
        None => false,
    }
}

/// Walks a dotted path of alternating field names and element ids down to
/// the array to append into, creating the leaf array if the field is absent.
fn resolve_child_array<'a>(doc: &'a mut Document, path: &str) -> Option<&'a mut Vec<Value>> {
    let mut segments = path.split('.');
    let mut current = doc;

    loop {
        let field = segments.next()?;
        let slot = current.entry(field.to_string()).or_insert_with(|| Value::Array(Vec::new()));
        let array = slot.as_array_mut()?;

        let Some(element_id) = segments.next() else {
            return Some(array);
        };
        current = array
            .iter_mut()
            .filter_map(Value::as_object_mut)
            .find(|item| item.get("id").and_then(Value::as_str) == Some(element_id))?;
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn insert_generates_id_and_get_by_id_round_trips() {
        let store = MemoryStore::new();
        let id = store
            .insert(Collection::Users, json!({"name": "Alice", "email": "alice@example.com"}))
            .await
            .expect("insert");

        let doc = store.get_by_id(Collection::Users, &id).await.expect("get").expect("present");
        assert_eq!(doc.get("id").and_then(Value::as_str), Some(id.as_str()));
        assert_eq!(doc.get("name"), Some(&json!("Alice")));
    }

    #[tokio::test]
    async fn insert_keeps_provided_id() {
        let store = MemoryStore::new();
        let id = store
            .insert(Collection::Courses, json!({"id": "course-1", "title": "Rust"}))
            .await
            .expect("insert");
        assert_eq!(id, "course-1");
    }

    #[tokio::test]
    async fn get_where_matches_scalar_and_array_contains() {
        let store = MemoryStore::new();
        store
            .insert(
                Collection::Courses,
                json!({"id": "c1", "teacher_id": "t1", "students_enrolled": ["s1", "s2"]}),
            )
            .await
            .expect("insert");
        store
            .insert(
                Collection::Courses,
                json!({"id": "c2", "teacher_id": "t2", "students_enrolled": []}),
            )
            .await
            .expect("insert");

        let by_teacher =
            store.get_where(Collection::Courses, "teacher_id", &json!("t1")).await.expect("where");
        assert_eq!(by_teacher.len(), 1);

        let by_student = store
            .get_where(Collection::Courses, "students_enrolled", &json!("s2"))
            .await
            .expect("where");
        assert_eq!(by_student.len(), 1);
        assert_eq!(by_student[0].get("id"), Some(&json!("c1")));
    }

    #[tokio::test]
    async fn update_shallow_merges_fields() {
        let store = MemoryStore::new();
        store
            .insert(Collection::Users, json!({"id": "u1", "name": "Bob", "login_streak": 2}))
            .await
            .expect("insert");

        store
            .update(Collection::Users, "u1", json!({"login_streak": 3}))
            .await
            .expect("update");

        let doc = store.get_by_id(Collection::Users, "u1").await.expect("get").expect("present");
        assert_eq!(doc.get("name"), Some(&json!("Bob")));
        assert_eq!(doc.get("login_streak"), Some(&json!(3)));
    }

    #[tokio::test]
    async fn update_missing_record_is_an_error() {
        let store = MemoryStore::new();
        let err = store
            .update(Collection::Users, "missing", json!({"name": "x"}))
            .await
            .expect_err("should fail");
        assert!(matches!(err, StoreError::RecordNotFound { .. }));
    }

    #[tokio::test]
    async fn append_child_reaches_nested_module_arrays() {
        let store = MemoryStore::new();
        store
            .insert(Collection::Courses, json!({"id": "c1", "title": "Rust", "modules": []}))
            .await
            .expect("insert");

        let module_id = store
            .append_child(
                Collection::Courses,
                "c1",
                "modules",
                json!({"title": "Intro", "videos": [], "study_materials": []}),
            )
            .await
            .expect("append module");

        let video_id = store
            .append_child(
                Collection::Courses,
                "c1",
                &format!("modules.{module_id}.videos"),
                json!({"title": "Welcome", "url": "https://example.com/v"}),
            )
            .await
            .expect("append video");

        let doc = store.get_by_id(Collection::Courses, "c1").await.expect("get").expect("present");
        let videos = doc["modules"][0]["videos"].as_array().expect("videos");
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0]["id"], json!(video_id));
    }

    #[tokio::test]
    async fn append_child_unknown_module_is_an_error() {
        let store = MemoryStore::new();
        store
            .insert(Collection::Courses, json!({"id": "c1", "modules": []}))
            .await
            .expect("insert");

        let err = store
            .append_child(Collection::Courses, "c1", "modules.nope.videos", json!({"title": "x"}))
            .await
            .expect_err("should fail");
        assert!(matches!(err, StoreError::ChildPathNotFound { .. }));
    }
}
