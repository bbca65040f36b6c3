/// In-memory document store
///
/// Holds every collection in a `BTreeMap` behind a single `tokio` RwLock, so
/// queries come back ordered by document id just like the PostgreSQL backend.
/// Data lives only as long as the process. Used by the test suites and when
/// the server starts without a database URL.

use super::{generate_id, Collection, Document, DocumentStore, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

type Documents = BTreeMap<String, Map<String, Value>>;

/// Process-local [`DocumentStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Documents>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn document(id: &str, data: &Map<String, Value>) -> Document {
    Document {
        id: id.to_string(),
        data: Value::Object(data.clone()),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: Collection, id: &str) -> StoreResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.get(id))
            .map(|data| document(id, data)))
    }

    async fn create(
        &self,
        collection: Collection,
        id: &str,
        data: Map<String, Value>,
    ) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();
        if docs.contains_key(id) {
            return Err(StoreError::AlreadyExists {
                collection,
                id: id.to_string(),
            });
        }
        docs.insert(id.to_string(), data);
        Ok(())
    }

    async fn add(&self, collection: Collection, data: Map<String, Value>) -> StoreResult<String> {
        let id = generate_id();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection)
            .or_default()
            .insert(id.clone(), data);
        Ok(id)
    }

    async fn add_stamped(
        &self,
        collection: Collection,
        mut data: Map<String, Value>,
        timestamp_field: &str,
    ) -> StoreResult<Document> {
        let id = generate_id();
        data.insert(timestamp_field.to_string(), serde_json::to_value(Utc::now())?);

        let stored = document(&id, &data);
        let mut collections = self.collections.write().await;
        collections.entry(collection).or_default().insert(id, data);
        Ok(stored)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        let existing = collections
            .get_mut(&collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::NotFound {
                collection,
                id: id.to_string(),
            })?;

        existing.extend(fields);
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> StoreResult<bool> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(&collection)
            .map(|docs| docs.remove(id).is_some())
            .unwrap_or(false))
    }

    async fn find_eq(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> StoreResult<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, data)| data.get(field).and_then(Value::as_str) == Some(value))
                    .map(|(id, data)| document(id, data))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn scan(&self, collection: Collection) -> StoreResult<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| docs.iter().map(|(id, data)| document(id, data)).collect())
            .unwrap_or_default())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = MemoryStore::new();
        let id = store
            .add(Collection::Tasks, object(json!({ "task": "a" })))
            .await
            .unwrap();

        assert!(store.get(Collection::Tasks, &id).await.unwrap().is_some());
        assert!(store.get(Collection::GroupTasks, &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_merges_top_level_fields() {
        let store = MemoryStore::new();
        let id = store
            .add(
                Collection::Tasks,
                object(json!({ "task": "a", "status": "open", "userName": "bob" })),
            )
            .await
            .unwrap();

        store
            .update(Collection::Tasks, &id, object(json!({ "status": "done" })))
            .await
            .unwrap();

        let doc = store.get(Collection::Tasks, &id).await.unwrap().unwrap();
        assert_eq!(
            doc.data,
            json!({ "task": "a", "status": "done", "userName": "bob" })
        );
    }

    #[tokio::test]
    async fn test_find_eq_ignores_non_string_fields() {
        let store = MemoryStore::new();
        store
            .add(Collection::Users, object(json!({ "grupo": 7 })))
            .await
            .unwrap();
        store
            .add(Collection::Users, object(json!({ "grupo": "7" })))
            .await
            .unwrap();

        let found = store.find_eq(Collection::Users, "grupo", "7").await.unwrap();
        assert_eq!(found.len(), 1);
    }
}
