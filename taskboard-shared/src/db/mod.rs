/// Document store layer for Taskboard
///
/// All persistence goes through the [`DocumentStore`] trait: a keyed,
/// collection-oriented store supporting point reads and writes, equality
/// queries, and full scans. The application builds one store at startup and
/// shares it as `Arc<dyn DocumentStore>`.
///
/// # Modules
///
/// - `memory`: In-process store used for tests and local development
/// - `postgres`: JSONB-backed store on PostgreSQL
/// - `pool`: PostgreSQL connection pool management with health checks
/// - `migrations`: Embedded schema migrations for the PostgreSQL backend
///
/// # Example
///
/// ```
/// use taskboard_shared::db::{memory::MemoryStore, to_object, Collection, DocumentStore};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), taskboard_shared::db::StoreError> {
/// let store = MemoryStore::new();
/// let data = to_object(&json!({ "groupName": "Engineering" }))?;
/// let id = store.add(Collection::Groups, data).await?;
/// let doc = store.get(Collection::Groups, &id).await?;
/// assert!(doc.is_some());
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Error type for document store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Document does not exist
    #[error("Document {collection}/{id} not found")]
    NotFound { collection: Collection, id: String },

    /// A conditional create hit an existing key
    #[error("Document {collection}/{id} already exists")]
    AlreadyExists { collection: Collection, id: String },

    /// Stored document could not be decoded into the requested type
    #[error("Failed to decode document: {0}")]
    Decode(#[from] serde_json::Error),

    /// Document data is not a JSON object
    #[error("Document data must be a JSON object")]
    NotAnObject,

    /// Backend failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Logical collections
///
/// Personal tasks and group-assigned tasks live in separate collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Users,
    Tasks,
    GroupTasks,
    Groups,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Tasks => "tasks",
            Collection::GroupTasks => "group_tasks",
            Collection::Groups => "groups",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored document: its key and its JSON object body
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

impl Document {
    /// Decodes the body into a typed record carrying the document id
    pub fn into_record<T: DeserializeOwned>(self) -> StoreResult<Record<T>> {
        Ok(Record {
            id: self.id,
            data: serde_json::from_value(self.data)?,
        })
    }
}

/// A typed document as exposed over the API: `{ "id": ..., ...fields }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    pub id: String,

    #[serde(flatten)]
    pub data: T,
}

/// Decodes every document in `docs` into typed records
pub fn into_records<T: DeserializeOwned>(docs: Vec<Document>) -> StoreResult<Vec<Record<T>>> {
    docs.into_iter().map(Document::into_record).collect()
}

/// Serializes a model into the JSON object body a store expects
pub fn to_object<T: Serialize>(value: &T) -> StoreResult<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::NotAnObject),
    }
}

/// Keyed, collection-scoped document persistence
///
/// Implementations provide per-document atomicity only. There are no
/// cross-document transactions and no retries.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads the document stored under `id`
    async fn get(&self, collection: Collection, id: &str) -> StoreResult<Option<Document>>;

    /// Writes a document under a caller-chosen key
    ///
    /// Fails with [`StoreError::AlreadyExists`] if the key is taken.
    async fn create(
        &self,
        collection: Collection,
        id: &str,
        data: Map<String, Value>,
    ) -> StoreResult<()>;

    /// Writes a document under a store-generated id and returns that id
    async fn add(&self, collection: Collection, data: Map<String, Value>) -> StoreResult<String>;

    /// Like [`add`](Self::add), but the store writes its current time into
    /// `timestamp_field` and returns the document as stored
    async fn add_stamped(
        &self,
        collection: Collection,
        data: Map<String, Value>,
        timestamp_field: &str,
    ) -> StoreResult<Document>;

    /// Merges top-level `fields` into an existing document
    ///
    /// Fails with [`StoreError::NotFound`] if there is no document at `id`;
    /// an update never creates one.
    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> StoreResult<()>;

    /// Removes the document at `id`, returning whether one existed
    async fn delete(&self, collection: Collection, id: &str) -> StoreResult<bool>;

    /// All documents whose string `field` equals `value`, ordered by id
    async fn find_eq(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> StoreResult<Vec<Document>>;

    /// Every document in the collection, ordered by id
    async fn scan(&self, collection: Collection) -> StoreResult<Vec<Document>>;

    /// Connectivity probe
    async fn ping(&self) -> StoreResult<()>;
}

/// Generates an opaque document id
pub(crate) fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
