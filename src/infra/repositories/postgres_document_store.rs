use crate::domain::ports::{DocumentBody, DocumentStore, StoredDocument};
use crate::error::AppError;
use crate::infra::repositories::generate_document_id;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{types::Json, FromRow, PgPool};

#[derive(FromRow)]
struct DocumentRow {
    id: String,
    body: Json<DocumentBody>,
}

impl From<DocumentRow> for StoredDocument {
    fn from(row: DocumentRow) -> Self {
        StoredDocument { id: row.id, body: row.body.0 }
    }
}

pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn get_all(&self, collection: &str) -> Result<Vec<StoredDocument>, AppError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body FROM documents WHERE collection = $1 ORDER BY created_at",
        )
            .bind(collection)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(rows.into_iter().map(StoredDocument::from).collect())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, AppError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body FROM documents WHERE collection = $1 AND id = $2",
        )
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(row.map(StoredDocument::from))
    }

    async fn add(&self, collection: &str, body: &DocumentBody) -> Result<String, AppError> {
        let id = generate_document_id();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO documents (collection, id, body, created_at, updated_at) VALUES ($1, $2, $3, $4, $5)",
        )
            .bind(collection)
            .bind(&id)
            .bind(Json(body))
            .bind(now)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, patch: &DocumentBody) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE documents SET body = body || $1, updated_at = $2 WHERE collection = $3 AND id = $4",
        )
            .bind(Json(patch))
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
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
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
