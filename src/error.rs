use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use mongodb::bson;
use serde_json::json;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a `BookStore`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("book not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Storage(#[from] mongodb::error::Error),

    #[error("failed to encode document: {0}")]
    Encode(#[from] bson::ser::Error),
}

/// Fatal errors during startup.
#[derive(Debug, Error)]
pub enum BootError {
    #[error("database unreachable: {0}")]
    Connection(#[from] mongodb::error::Error),

    #[error("database did not answer within {0} seconds")]
    ConnectionTimeout(u64),
}

/// Errors surfaced at the handler boundary, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("storage operation failed: {}", self);
        }
        HttpResponse::build(status).json(json!({ "error": self.to_string() }))
    }
}
