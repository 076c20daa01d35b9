// src/application/error_handling.rs
//
// HTTP error mapping
//
// ARCHITECTURE:
// - Maps internal errors to JSON responses with a status code
// - Provides one error format for every endpoint
// - Never exposes infrastructure details, logs them instead

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::error::AppError;

/// Standard error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Invalid input (400)
    Validation,

    /// Resource not found (404)
    NotFound,

    /// Uniqueness conflict (409)
    Duplicate,

    /// Database/persistence error (500)
    Database,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorType {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorType::Validation => StatusCode::BAD_REQUEST,
            ErrorType::NotFound => StatusCode::NOT_FOUND,
            ErrorType::Duplicate => StatusCode::CONFLICT,
            ErrorType::Database | ErrorType::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::Domain(DomainError::Validation(message)) => {
                Self::new(ErrorType::Validation, message, None)
            }
            AppError::Domain(DomainError::NotFound(message)) => {
                Self::new(ErrorType::NotFound, message, None)
            }
            AppError::Domain(DomainError::Duplicate(message)) => {
                Self::new(ErrorType::Duplicate, message, None)
            }

            AppError::Database(db_error) => {
                log::error!("database error: {:?}", db_error);
                Self::new(
                    ErrorType::Database,
                    "Database operation failed",
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::Pool(pool_error) => {
                log::error!("connection pool error: {}", pool_error);
                Self::new(ErrorType::Database, "Database connection failed", None)
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);
                Self::new(ErrorType::Internal, "File system operation failed", None)
            }

            AppError::Other(message) => {
                log::error!("internal error: {}", message);
                Self::new(ErrorType::Internal, "Internal error", None)
            }
        }
    }

    /// Malformed request body, path or query string
    pub fn bad_request(message: impl Into<String>, details: String) -> Self {
        Self::new(ErrorType::Validation, message, Some(details))
    }

    pub fn status(&self) -> StatusCode {
        self.error_type.status()
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self::from_app_error(error)
    }
}

impl From<JsonRejection> for ErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("Malformed JSON body", rejection.body_text())
    }
}

impl From<PathRejection> for ErrorResponse {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request("Malformed path parameter", rejection.body_text())
    }
}

impl From<QueryRejection> for ErrorResponse {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request("Malformed query string", rejection.body_text())
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
