use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sea-orm.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Record not found.
    #[error("Not found: {context}")]
    NotFound { context: String },
}

impl StoreError {
    /// Create a NotFound error for a UUID lookup.
    pub fn not_found_by_id(id: Uuid) -> Self {
        Self::NotFound {
            context: format!("id={}", id),
        }
    }

    /// Whether this error is a unique-constraint violation.
    ///
    /// The resolver treats a violation on insert or login update as proof
    /// that a concurrent writer got there first, and re-runs resolution
    /// instead of failing.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Database(err) => {
                matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
            }
            _ => false,
        }
    }

    /// Whether this error is likely transient (lock contention, dropped
    /// connection) and worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Database(err) => {
                let msg = err.to_string().to_ascii_lowercase();
                msg.contains("locked") || msg.contains("busy") || msg.contains("connection")
            }
            _ => false,
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
