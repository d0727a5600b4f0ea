use std::fmt;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use wayfare_core::CoreError;

/// Endpoint-boundary error. Only the static message reaches the caller;
/// the source of an internal error is logged and dropped.
#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    InternalServerError {
        message: String,
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn internal(message: &str, err: impl Into<anyhow::Error>) -> Self {
        AppError::InternalServerError {
            message: message.to_string(),
            source: err.into(),
        }
    }

    /// A caller mistake on an endpoint that answers 400. The detail is
    /// logged; only `message` is returned.
    pub fn invalid(message: &str, detail: impl fmt::Display) -> Self {
        tracing::debug!(%detail, "{}", message);
        AppError::ValidationError(message.to_string())
    }

    /// `NotFound` becomes a 404 with `not_found`, anything else a 500 with
    /// `message`.
    pub fn from_core(err: CoreError, message: &str, not_found: &str) -> Self {
        match err {
            CoreError::NotFound(what) => {
                tracing::warn!(%what, "{}", not_found);
                AppError::NotFoundError(not_found.to_string())
            }
            other => AppError::internal(message, other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InternalServerError { message, source } => {
                tracing::error!(error = %format!("{:#}", source), "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        AppError::ValidationError("Invalid request body".to_string())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected query string");
        AppError::ValidationError("Invalid query parameters".to_string())
    }
}
