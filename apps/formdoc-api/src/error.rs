//! Error types for FormDoc API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use draft_store::StoreError;
use shared_types::FieldErrors;
use template_engine::TemplateError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Draft not found: {0}")]
    DraftNotFound(String),

    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("File rejected: {0}")]
    FileRejected(#[from] formdoc_core::ResolveError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<TemplateError> for ApiError {
    fn from(e: TemplateError) -> Self {
        match e {
            TemplateError::UnknownTemplate(id) => ApiError::TemplateNotFound(id),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Validation failures carry the full field error map, all-or-nothing.
        if let ApiError::Validation(errors) = &self {
            let body = Json(json!({
                "valid": false,
                "errors": errors,
            }));
            return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
        }

        let (status, code, message) = match &self {
            ApiError::TemplateNotFound(id) => (
                StatusCode::NOT_FOUND,
                "TEMPLATE_NOT_FOUND",
                format!("Template '{}' not found", id),
            ),
            ApiError::DraftNotFound(id) => (
                StatusCode::NOT_FOUND,
                "DRAFT_NOT_FOUND",
                format!("No draft saved for template '{}'", id),
            ),
            ApiError::Validation(_) => unreachable!("handled above"),
            ApiError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg.clone())
            }
            ApiError::FileRejected(e) => {
                // The client resets the field to empty on rejection; the
                // message says why.
                (StatusCode::BAD_REQUEST, "FILE_REJECTED", e.to_string())
            }
            ApiError::Store(e) => {
                tracing::error!("Store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "Draft store error".to_string(),
                )
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "code": code,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
