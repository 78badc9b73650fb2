// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A bulk query against one of the backing stores failed.
    /// Callers are expected to present this as transient and offer a retry.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Resource not found")]
    NotFound,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::Other(format!("UUID error: {}", err))
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::Other(format!("Date parse error: {}", err))
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Other(format!("Blocking task failed: {}", err))
    }
}

impl AppError {
    /// True when SQLite refused a write because of a UNIQUE/CHECK/FK constraint
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            AppError::Database(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// A point lookup (parent request, user profile) that came back empty.
///
/// Never surfaced to callers: the aggregator either drops the item or
/// falls back to generic text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinMiss {
    #[error("record not found")]
    NotFound,

    #[error("lookup failed: {0}")]
    Failed(String),
}

impl JoinMiss {
    /// Collapse a point-lookup result into presence or a miss.
    pub fn from_lookup<T>(result: AppResult<Option<T>>) -> Result<T, JoinMiss> {
        match result {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Err(JoinMiss::NotFound),
            Err(e) => Err(JoinMiss::Failed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_miss_from_lookup() {
        assert_eq!(JoinMiss::from_lookup(Ok(Some(7))), Ok(7));
        assert_eq!(JoinMiss::from_lookup::<i32>(Ok(None)), Err(JoinMiss::NotFound));

        let failed = JoinMiss::from_lookup::<i32>(Err(AppError::Pool("timed out".to_string())));
        assert!(matches!(failed, Err(JoinMiss::Failed(msg)) if msg.contains("timed out")));
    }

    #[test]
    fn test_app_error_serializes_as_message() {
        let json = serde_json::to_string(&AppError::BackendUnavailable("walk_requests".into())).unwrap();
        assert_eq!(json, "\"Backend unavailable: walk_requests\"");
    }
}
