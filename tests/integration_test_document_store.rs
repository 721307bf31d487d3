mod common;

use common::TestApp;
use event_admin::{
    domain::ports::{DocumentBody, DocumentStore},
    error::AppError,
    infra::repositories::sqlite_document_store::SqliteDocumentStore,
};
use serde_json::{json, Value};

fn body(value: Value) -> DocumentBody {
    match value {
        Value::Object(map) => map,
        _ => panic!("test body must be an object"),
    }
}

#[tokio::test]
async fn test_add_get_and_merge() {
    let app = TestApp::new().await;
    let store = SqliteDocumentStore::new(app.pool.clone());

    let id = store.add("Events", &body(json!({
        "Name": "Jazz Night",
        "Sold": 0,
        "StartDateTime": { "_seconds": 1783130400, "_nanoseconds": 0 }
    }))).await.unwrap();
    assert_eq!(id.len(), 20);
    assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));

    store.update("Events", &id, &body(json!({
        "Sold": 12,
        "StartDateTime": { "_seconds": 1783134000, "_nanoseconds": 0 }
    }))).await.unwrap();

    let stored = store.get("Events", &id).await.unwrap().unwrap();
    assert_eq!(stored.id, id);
    assert_eq!(stored.body["Name"], "Jazz Night");
    assert_eq!(stored.body["Sold"], 12);
    assert_eq!(stored.body["StartDateTime"]["_seconds"], 1783134000);
}

#[tokio::test]
async fn test_collections_are_isolated() {
    let app = TestApp::new().await;
    let store = SqliteDocumentStore::new(app.pool.clone());

    let id = store.add("Events", &body(json!({ "Name": "A" }))).await.unwrap();
    store.add("Archive", &body(json!({ "Name": "B" }))).await.unwrap();

    assert_eq!(store.get_all("Events").await.unwrap().len(), 1);
    assert_eq!(store.get_all("Archive").await.unwrap().len(), 1);
    assert!(store.get_all("Unused").await.unwrap().is_empty());
    assert!(store.get("Archive", &id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_and_delete_missing_document() {
    let app = TestApp::new().await;
    let store = SqliteDocumentStore::new(app.pool.clone());

    let err = store.update("Events", "missing", &body(json!({ "Sold": 1 }))).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = store.delete("Events", "missing").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_removes_document() {
    let app = TestApp::new().await;
    let store = SqliteDocumentStore::new(app.pool.clone());

    let id = store.add("Events", &body(json!({ "Name": "Gone soon" }))).await.unwrap();
    store.delete("Events", &id).await.unwrap();

    assert!(store.get("Events", &id).await.unwrap().is_none());
}
