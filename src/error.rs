use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Malformed document: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Event is invalid: {}", .0.join("; "))]
    InvalidEvent(Vec<String>),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Internal server error")]
    Internal,
    #[error("Internal server error: {0}")]
    InternalWithMsg(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidEvent(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Database(_)
            | AppError::Serialization(_)
            | AppError::Internal
            | AppError::InternalWithMsg(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show the caller. Store and internal causes stay in the logs.
    fn public_message(&self) -> String {
        match self {
            AppError::NotFound(msg) | AppError::Validation(msg) | AppError::Forbidden(msg) => msg.clone(),
            AppError::InvalidEvent(errors) => errors.first().cloned().unwrap_or_else(|| "Invalid event".to_string()),
            AppError::Unauthorized => "Unauthorized".to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(e) => error!("Database error: {:?}", e),
            AppError::Serialization(e) => error!("Stored document could not be decoded: {}", e),
            AppError::InternalWithMsg(msg) => error!("Internal error: {}", msg),
            _ => {}
        }

        let mut body = json!({
            "success": false,
            "error": self.public_message(),
        });
        if let AppError::InvalidEvent(errors) = &self {
            body["errors"] = Value::from(errors.clone());
        }

        (self.status(), Json(body)).into_response()
    }
}
