use thiserror::Error;

use crate::types::traits::StoreError;

/// Error types for repository/database operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database error - wraps all SeaORM errors
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    /// Record not found error
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Stored row that cannot be mapped back to a domain value.
    #[error("Corrupted record: {0}")]
    Corrupted(String),
}

impl From<RepositoryError> for StoreError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Database(e) => StoreError::Database(e),
            other => StoreError::Backend(other.to_string()),
        }
    }
}
