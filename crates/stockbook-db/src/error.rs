//! # Storage Error Types
//!
//! Error types for storage operations, including the classification of
//! raw sqlx errors into the domain error kinds the ledger relies on.
//!
//! ## Error Flow
//! ```text
//! SQLite error (sqlx::Error)
//!      │
//!      ▼
//! StoreError (this module)  - classifies constraint violations:
//!      │                      FOREIGN KEY  → ReferentialConflict
//!      │                      stock CHECK  → StockConstraint
//!      ▼
//! ApiError (apps/server)    - mapped to HTTP status codes
//! ```

use thiserror::Error;

use stockbook_core::ValidationError;

/// Name of the CHECK constraint guarding `inventory.quantity >= 0`.
///
/// The ledger engine detects an over-sell by this name appearing in the
/// constraint violation message, rather than re-querying stock levels.
pub const STOCK_CHECK_CONSTRAINT: &str = "stock_not_negative";

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Caller input failed a precondition. Raised before any transaction
    /// is opened.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Entity not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Delete blocked by a foreign-key relationship (e.g. removing an
    /// inventory item that line items still reference).
    #[error("operation conflicts with existing references: {message}")]
    ReferentialConflict { message: String },

    /// A sale's line items would drive an item's quantity negative.
    /// Always accompanied by a full rollback of the transaction.
    #[error("insufficient stock: {message}")]
    StockConstraint { message: String },

    /// Database connection failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed (constraint violation not matching the
    /// patterns above, malformed SQL, ...).
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("connection pool exhausted")]
    PoolExhausted,

    /// Any other storage-layer failure.
    #[error("internal storage error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        StoreError::NotFound { entity, id }
    }
}

/// Classification of sqlx errors.
///
/// SQLite reports constraint failures only through the error message:
/// `FOREIGN KEY constraint failed`, `CHECK constraint failed: <name>`,
/// `UNIQUE constraint failed: <table>.<column>`. The stock CHECK carries
/// the [`STOCK_CHECK_CONSTRAINT`] name so an over-sell is
/// distinguishable from any other CHECK.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                if msg.contains(STOCK_CHECK_CONSTRAINT) {
                    StoreError::StockConstraint {
                        message: msg.to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    StoreError::ReferentialConflict {
                        message: msg.to_string(),
                    }
                } else {
                    StoreError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => StoreError::PoolExhausted,

            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("pool is closed".to_string()),

            _ => StoreError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_pass_through() {
        let err: StoreError = ValidationError::EmptyLineItems { kind: "sale" }.into();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(err.to_string(), "sale must have at least one line item");
    }

    #[test]
    fn not_found_message() {
        let err = StoreError::not_found("InventoryItem", 42);
        assert_eq!(err.to_string(), "InventoryItem not found: 42");
    }
}
