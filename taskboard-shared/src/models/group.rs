/// Group model and store operations
///
/// Groups are created once and never changed. Users and assigned tasks refer
/// to them by id without any referential check.

use crate::db::{into_records, to_object, Collection, DocumentStore, Record, StoreResult};
use serde::{Deserialize, Serialize};

/// Group document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub group_name: String,
    pub created_by: String,
}

impl Group {
    /// Stores a new group and returns its generated id
    pub async fn create(store: &dyn DocumentStore, group: &Group) -> StoreResult<String> {
        store.add(Collection::Groups, to_object(group)?).await
    }

    /// Every group; unpaginated
    pub async fn list(store: &dyn DocumentStore) -> StoreResult<Vec<Record<Self>>> {
        into_records(store.scan(Collection::Groups).await?)
    }
}
