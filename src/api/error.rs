//! API error responses.
//!
//! Every failure is rendered as `{"error": "<message>"}`. Business rule
//! violations and storage failures keep HTTP 200 so clients read the body
//! rather than the status; only unknown endpoints (404) and broken requests
//! or panics (500) use an error status.

use axum::{
    extract::rejection::{BytesRejection, FormRejection, JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::DataError;
use crate::validation::ValidationError;

pub const NOT_FOUND_MESSAGE: &str = "Endpoint not found.";
pub const INTERNAL_MESSAGE: &str = "An internal server error occurred.";

/// The response envelope for errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// A client-facing error carried in a normal 200 response
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, message)
    }

    /// Unknown endpoint (404)
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
    }

    /// Internal server error (500)
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE)
    }

    /// Log a storage failure and answer with the operation's generic message
    pub fn storage(err: DataError, message: &str) -> Self {
        tracing::error!(error = %err, "{}", message);
        Self::message(message)
    }

    /// Map a validator outcome: rule violations go back verbatim, lookup
    /// failures become the operation's generic message.
    pub fn rejected(err: ValidationError, message: &str) -> Self {
        match err {
            ValidationError::Invalid(msg) => Self::message(msg),
            ValidationError::Data(err) => Self::storage(err, message),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn text(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(error = %rejection, "Rejected request body");
        ApiError::internal()
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        tracing::warn!(error = %rejection, "Rejected form body");
        ApiError::internal()
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        tracing::warn!(error = %rejection, "Failed to read request body");
        ApiError::internal()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::warn!(error = %rejection, "Rejected query string");
        ApiError::internal()
    }
}
