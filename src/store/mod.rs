pub(crate) mod memory;
pub(crate) mod seed;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// A stored record: a JSON object carrying an `id` string field.
pub(crate) type Document = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Collection {
    Users,
    Courses,
    Assignments,
    Submissions,
    Announcements,
    Reviews,
    Threads,
    Replies,
    Notifications,
}

impl Collection {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Courses => "courses",
            Self::Assignments => "assignments",
            Self::Submissions => "submissions",
            Self::Announcements => "announcements",
            Self::Reviews => "reviews",
            Self::Threads => "threads",
            Self::Replies => "replies",
            Self::Notifications => "notifications",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("{collection} record {id} not found")]
    RecordNotFound { collection: Collection, id: String },
    #[error("{collection} record {id} has no child path {path}")]
    ChildPathNotFound { collection: Collection, id: String, path: String },
    #[error("record data for {collection} must be a JSON object")]
    NotAnObject { collection: Collection },
    #[error("malformed {collection} record: {source}")]
    Malformed {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },
}

/// Document persistence boundary. The in-memory implementation backs tests
/// and the demo deployment; a real document-database client can substitute.
///
/// `get_where` matches top-level field equality; a field holding an array
/// matches when it contains the value. `update` shallow-merges top-level
/// fields. `append_child` pushes into a nested array field addressed by a
/// dotted path alternating field names and element ids
/// (e.g. `modules` or `modules.<module_id>.videos`).
#[async_trait]
pub(crate) trait RecordStore: Send + Sync {
    async fn get_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, StoreError>;

    async fn get_where(
        &self,
        collection: Collection,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError>;

    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError>;

    /// Inserts a record, generating an id when `data` does not carry one,
    /// and returns the id.
    async fn insert(&self, collection: Collection, data: Value) -> Result<String, StoreError>;

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: Value,
    ) -> Result<(), StoreError>;

    async fn append_child(
        &self,
        collection: Collection,
        parent_id: &str,
        child_field: &str,
        data: Value,
    ) -> Result<String, StoreError>;
}
