/// Personal task model and store operations
///
/// Personal tasks live in the `tasks` collection under store-generated ids.
/// `userName` and `status` are stored exactly as the client sent them.

use crate::db::{into_records, to_object, Collection, DocumentStore, Record, StoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Field the store stamps on creation
pub const CREATED_AT: &str = "createdAt";

/// Personal task document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Owner; listings filter on this
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    /// Description
    pub task: String,

    pub date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Server-assigned creation time
    pub created_at: DateTime<Utc>,
}

/// Input for creating a personal task
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    pub task: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Fields an update overwrites; all three are always written
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateTask {
    pub task: String,
    pub date: String,
    pub status: String,
}

impl Task {
    /// Stores a new task and returns its generated id
    pub async fn create(store: &dyn DocumentStore, data: CreateTask) -> StoreResult<String> {
        let doc = store
            .add_stamped(Collection::Tasks, to_object(&data)?, CREATED_AT)
            .await?;
        Ok(doc.id)
    }

    pub async fn find_by_id(store: &dyn DocumentStore, id: &str) -> StoreResult<Option<Record<Self>>> {
        match store.get(Collection::Tasks, id).await? {
            Some(doc) => Ok(Some(doc.into_record()?)),
            None => Ok(None),
        }
    }

    /// Tasks whose `userName` equals `owner` exactly
    pub async fn list_by_owner(store: &dyn DocumentStore, owner: &str) -> StoreResult<Vec<Record<Self>>> {
        let docs = store.find_eq(Collection::Tasks, "userName", owner).await?;
        into_records(docs)
    }

    /// Overwrites `task`, `date` and `status`; owner and creation time stay
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if there is no task at `id`.
    pub async fn update(store: &dyn DocumentStore, id: &str, data: UpdateTask) -> StoreResult<()> {
        store.update(Collection::Tasks, id, to_object(&data)?).await
    }

    /// Removes the task, returning whether it existed
    pub async fn delete(store: &dyn DocumentStore, id: &str) -> StoreResult<bool> {
        store.delete(Collection::Tasks, id).await
    }
}
