/// Document store contract tests against the in-memory backend

use serde_json::{json, Value};
use std::sync::Arc;
use taskboard_shared::db::{
    memory::MemoryStore, to_object, Collection, DocumentStore, StoreError,
};

fn object(value: Value) -> serde_json::Map<String, Value> {
    to_object(&value).unwrap()
}

#[tokio::test]
async fn test_concurrent_creates_keep_first_writer() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .create(
                        Collection::Users,
                        "alice@example.com",
                        object(json!({ "userName": format!("alice{}", i) })),
                    )
                    .await
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => created += 1,
            Err(StoreError::AlreadyExists { .. }) => {}
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(store.scan(Collection::Users).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_add_generates_distinct_ids() {
    let store = MemoryStore::new();

    let a = store.add(Collection::Groups, object(json!({ "groupName": "A" }))).await.unwrap();
    let b = store.add(Collection::Groups, object(json!({ "groupName": "A" }))).await.unwrap();

    assert_ne!(a, b);
    assert_eq!(store.scan(Collection::Groups).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_add_stamped_overrides_client_timestamp() {
    let store = MemoryStore::new();

    let doc = store
        .add_stamped(
            Collection::GroupTasks,
            object(json!({ "taskName": "x", "createdAt": "1999-01-01" })),
            "createdAt",
        )
        .await
        .unwrap();

    assert_ne!(doc.data["createdAt"], "1999-01-01");
    let stored = store.get(Collection::GroupTasks, &doc.id).await.unwrap().unwrap();
    assert_eq!(stored.data, doc.data);
}

#[tokio::test]
async fn test_delete_and_update_after_delete() {
    let store = MemoryStore::new();
    let id = store.add(Collection::Tasks, object(json!({ "task": "a" }))).await.unwrap();

    assert!(store.delete(Collection::Tasks, &id).await.unwrap());
    assert!(!store.delete(Collection::Tasks, &id).await.unwrap());

    let err = store
        .update(Collection::Tasks, &id, object(json!({ "task": "b" })))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { collection: Collection::Tasks, .. }));
    assert!(store.get(Collection::Tasks, &id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_ping() {
    assert!(MemoryStore::new().ping().await.is_ok());
}
