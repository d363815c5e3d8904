//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation failed")]
    Validation(Vec<String>),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// 500 bodies carry the underlying message only in development mode.
fn expose_internal_detail() -> bool {
    std::env::var("APP_ENV").map(|v| v == "development").unwrap_or(false)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                errors.first().cloned().unwrap_or_else(|| "validation failed".into()),
                Some(serde_json::json!(errors)),
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone(), None)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone(), None),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone(), None),
            AppError::Db(e) => {
                if let sqlx::Error::RowNotFound = e {
                    (StatusCode::NOT_FOUND, "not_found", "Student not found".into(), None)
                } else {
                    tracing::error!(error = %e, "database error");
                    let message = if expose_internal_detail() {
                        e.to_string()
                    } else {
                        "An unexpected error occurred".into()
                    };
                    (StatusCode::INTERNAL_SERVER_ERROR, "database_error", message, None)
                }
            }
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };
        (status, Json(body)).into_response()
    }
}
