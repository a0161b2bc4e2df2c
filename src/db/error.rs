//! Database and store error types.

use thiserror::Error;

/// Errors reported by the prompt store and its persistence layer.
#[derive(Error, Debug)]
pub enum DbError {
    /// Prompt not found.
    #[error("prompt not found")]
    NotFound,

    /// A required field was empty after trimming.
    #[error("validation failed: {0}")]
    Validation(String),

    /// SQLx error.
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl DbError {
    /// Check if this is a not found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Check if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type for store operations.
pub type DbResult<T> = Result<T, DbError>;
