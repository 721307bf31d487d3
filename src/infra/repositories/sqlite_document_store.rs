use crate::domain::ports::{DocumentBody, DocumentStore, StoredDocument};
use crate::error::AppError;
use crate::infra::repositories::generate_document_id;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, SqlitePool};

#[derive(FromRow)]
struct DocumentRow {
    id: String,
    body: String,
}

impl DocumentRow {
    fn into_document(self) -> Result<StoredDocument, AppError> {
        let body: DocumentBody = serde_json::from_str(&self.body)?;
        Ok(StoredDocument { id: self.id, body })
    }
}

pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn get_all(&self, collection: &str) -> Result<Vec<StoredDocument>, AppError> {
        sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body FROM documents WHERE collection = ? ORDER BY created_at",
        )
            .bind(collection)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?
            .into_iter()
            .map(DocumentRow::into_document)
            .collect()
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, AppError> {
        sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body FROM documents WHERE collection = ? AND id = ?",
        )
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .map(DocumentRow::into_document)
            .transpose()
    }

    async fn add(&self, collection: &str, body: &DocumentBody) -> Result<String, AppError> {
        let id = generate_document_id();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO documents (collection, id, body, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
            .bind(collection)
            .bind(&id)
            .bind(serde_json::to_string(body)?)
            .bind(now)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, patch: &DocumentBody) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE documents SET body = json_patch(body, ?), updated_at = ? WHERE collection = ? AND id = ?",
        )
            .bind(serde_json::to_string(patch)?)
            .bind(Utc::now())
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Document not found".into()));
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Document not found".into()));
        }
        Ok(())
    }
}
