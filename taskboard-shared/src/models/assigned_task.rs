/// Group-assigned task model and store operations
///
/// Assigned tasks live in the `group_tasks` collection, apart from personal
/// tasks. Only `status` changes after creation, and there is no delete.

use crate::db::{into_records, to_object, Collection, DocumentStore, Record, StoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map};

/// Field the store stamps on creation
pub const CREATED_AT: &str = "createdAt";

/// Assigned task document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedTask {
    pub group_id: String,
    pub assigned_to: String,
    pub task_name: String,
    pub due_date: String,
    pub status: String,
    pub created_by: String,

    /// Server-assigned creation time
    pub created_at: DateTime<Utc>,
}

/// Input for assigning a task; every field is required
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignedTask {
    pub group_id: String,
    pub assigned_to: String,
    pub task_name: String,
    pub due_date: String,
    pub status: String,
    pub created_by: String,
}

impl AssignedTask {
    /// Stores the task and returns it as written, id and timestamp included
    pub async fn create(
        store: &dyn DocumentStore,
        data: CreateAssignedTask,
    ) -> StoreResult<Record<Self>> {
        store
            .add_stamped(Collection::GroupTasks, to_object(&data)?, CREATED_AT)
            .await?
            .into_record()
    }

    /// Tasks whose `groupId` equals `group_id` exactly
    pub async fn list_by_group(
        store: &dyn DocumentStore,
        group_id: &str,
    ) -> StoreResult<Vec<Record<Self>>> {
        let docs = store
            .find_eq(Collection::GroupTasks, "groupId", group_id)
            .await?;
        into_records(docs)
    }

    /// Overwrites `status`
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if there is no task at `id`.
    pub async fn update_status(store: &dyn DocumentStore, id: &str, status: &str) -> StoreResult<()> {
        let mut fields = Map::new();
        fields.insert("status".to_string(), json!(status));
        store.update(Collection::GroupTasks, id, fields).await
    }
}
