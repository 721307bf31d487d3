use crate::error::AppError;
use async_trait::async_trait;
use serde_json::{Map, Value};

pub type DocumentBody = Map<String, Value>;

#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: String,
    pub body: DocumentBody,
}

/// Collection-oriented document store. Collections spring into existence on
/// first write.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_all(&self, collection: &str) -> Result<Vec<StoredDocument>, AppError>;
    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, AppError>;
    /// Inserts a new document and returns its generated id.
    async fn add(&self, collection: &str, body: &DocumentBody) -> Result<String, AppError>;
    /// Merges `patch` into the stored body key by key. Fails with `NotFound`
    /// when the document does not exist.
    async fn update(&self, collection: &str, id: &str, patch: &DocumentBody) -> Result<(), AppError>;
    async fn delete(&self, collection: &str, id: &str) -> Result<(), AppError>;
}
