use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

use crate::auth::repository::UserRepository;
use crate::auth::token::TokenConfig;
use crate::hotel::repository::HotelRepository;
use crate::media::MediaStore;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub user_repository: Arc<dyn UserRepository + Send + Sync>,
    pub hotel_repository: Arc<dyn HotelRepository + Send + Sync>,
    pub media_store: Arc<dyn MediaStore + Send + Sync>,
    pub token_config: TokenConfig,
}

impl AppState {
    pub fn new(
        user_repository: Arc<dyn UserRepository + Send + Sync>,
        hotel_repository: Arc<dyn HotelRepository + Send + Sync>,
        media_store: Arc<dyn MediaStore + Send + Sync>,
        token_config: TokenConfig,
    ) -> Self {
        Self {
            user_repository,
            hotel_repository,
            media_store,
            token_config,
        }
    }
}

/// A single failed validation check, named after the request field it applies to
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Invalid Credentials")]
    InvalidCredentials,

    #[error("A user with this email already exists")]
    DuplicateEmail,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upload error: {0}")]
    UploadError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Validation failed", "fields": fields }),
            ),
            AppError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid Credentials" }),
            ),
            AppError::DuplicateEmail => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "A user with this email already exists" }),
            ),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, json!({ "error": msg })),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::UploadError(detail) => {
                // Detail stays in the logs; clients get a generic message
                error!(detail = %detail, "Image upload failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Image upload failed" }),
                )
            }
            AppError::DatabaseError(detail) => {
                error!(detail = %detail, "Database operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Something went wrong" }),
                )
            }
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Something went wrong" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
