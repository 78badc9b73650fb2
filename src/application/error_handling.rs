// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → caller-friendly responses
// - Consistent error format for every command
// - Never exposes internal implementation details
// - Logs infrastructure errors for debugging

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::error::AppError;

/// Standard error response returned by commands
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
    /// Resource not found (404)
    NotFound,

    /// Invalid input/validation error (400)
    Validation,

    /// Caller does not own the resource (403)
    Forbidden,

    /// Domain invariant violation or illegal state change (422)
    DomainError,

    /// A backing store could not be queried; safe to retry (503)
    BackendUnavailable,

    /// Database/persistence error (500)
    Database,

    /// File system error (500)
    FileSystem,

    /// Other/unknown error (500)
    Internal,
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
            AppError::NotFound => Self::new(ErrorType::NotFound, "Resource not found", None),

            AppError::Forbidden(reason) => {
                Self::new(ErrorType::Forbidden, "Not allowed", Some(reason))
            }

            AppError::Domain(DomainError::NotFound(what)) => {
                Self::new(ErrorType::NotFound, format!("{} not found", what), None)
            }

            AppError::Domain(domain_error) => Self::new(
                ErrorType::DomainError,
                "Domain validation failed",
                Some(domain_error.to_string()),
            ),

            AppError::BackendUnavailable(source) => {
                log::warn!("Backend unavailable: {}", source);
                Self::new(
                    ErrorType::BackendUnavailable,
                    "Could not load data, please try again",
                    None,
                )
            }

            AppError::Database(db_error) => {
                log::error!("Database error: {:?}", db_error);
                Self::new(
                    ErrorType::Database,
                    "Database operation failed",
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);
                Self::new(ErrorType::Database, "Database connection failed", None)
            }

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed", None)
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);
                Self::new(
                    ErrorType::FileSystem,
                    "File system operation failed",
                    Some(io_error.to_string()),
                )
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self::new(ErrorType::Validation, message, None)
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorType::NotFound, format!("{} not found", resource), None)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "Internal error".to_string())
    }
}

/// Helper trait to convert Results to a serialized ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| ErrorResponse::from_app_error(e).to_json())
    }
}
