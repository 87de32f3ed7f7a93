//! Application error type and its HTTP representation.
//!
//! Every request-facing failure is one of three kinds: the caller sent bad
//! input, the short link does not exist (or has expired), or storage failed.
//! All of them are rendered inside the same JSON envelope used for successful
//! responses, so the HTTP layer never has to special-case errors.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::api::dto::envelope::Envelope;

/// Errors surfaced at the request boundary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing, empty or malformed input.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// No live mapping matches the requested short ID.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Storage unreachable, rejected the operation, or exceeded its deadline.
    #[error("{message}")]
    Persistence { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn persistence(message: impl Into<String>, details: Value) -> Self {
        Self::Persistence {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Persistence { .. } => "persistence_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Persistence { message, details } => (message, details),
        };

        if status.is_server_error() {
            tracing::error!(code, %message, %details, "request failed");
        }

        (status, Json(Envelope::failure(code, message, details))).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        let details = match e.as_database_error() {
            Some(db) => json!({ "constraint": db.constraint(), "cause": db.message() }),
            None => json!({ "cause": e.to_string() }),
        };

        AppError::persistence("Database error", details)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let errors = e.field_errors();
        let fields: Vec<&str> = errors.keys().map(|k| k.as_ref()).collect();

        AppError::bad_request(
            "Request validation failed",
            json!({ "fields": fields, "reason": e.to_string() }),
        )
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::bad_request(
            "Read request body failed!",
            json!({ "reason": e.body_text() }),
        )
    }
}
