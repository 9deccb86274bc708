//! Domain error types for the game catalog.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use sea_orm::{DbErr, SqlErr};

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A uniqueness constraint rejected the write (duplicate slug, version or identifier)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A foreign key pointed at a row that does not exist
    #[error("Referential integrity violated: {0}")]
    ReferentialIntegrity(String),

    /// A release version is not a `major.minor.patch` triple
    #[error("Malformed version '{0}': expected major.minor.patch")]
    MalformedVersion(String),

    /// Every generated identifier collided with an existing row
    #[error("Could not assign a unique identifier after {0} attempts")]
    IdentifierExhausted(usize),

    /// Blob storage operation failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Classify a SeaORM error, keeping constraint violations distinguishable.
    pub fn from_db(context: &str, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                AppError::Conflict(format!("{}: {}", context, detail))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                AppError::ReferentialIntegrity(format!("{}: {}", context, detail))
            }
            _ => AppError::Database(format!("{}: {}", context, err)),
        }
    }

    /// Stable machine-readable code for the request layer.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::Conflict(_) => "CONFLICT",
            AppError::ReferentialIntegrity(_) => "REFERENTIAL_INTEGRITY",
            AppError::MalformedVersion(_) => "MALFORMED_VERSION",
            AppError::IdentifierExhausted(_) => "IDENTIFIER_EXHAUSTED",
            AppError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Whether the error was caused by a uniqueness constraint.
    pub fn is_conflict(&self) -> bool {
        matches!(self, AppError::Conflict(_))
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

// Conversion implementations for common error types

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::from_db("Query failed", err)
    }
}
