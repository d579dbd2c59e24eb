//! # Error Types
//!
//! Domain-level validation errors for stockbook-core.
//!
//! Storage errors live in `stockbook-db` (`StoreError`), and the HTTP
//! error shape lives in the server app. The flow is
//! `ValidationError → StoreError → ApiError → client`.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impls)
//! 2. Include the offending field in the message
//! 3. Errors are enum variants, never bare strings

use thiserror::Error;

/// Input validation errors.
///
/// Raised before any transaction is opened; a request that fails
/// validation never touches storage.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    NegativeAmount { field: &'static str },

    /// Field value exceeds the maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// A sale or supply order was submitted without line items.
    #[error("{kind} must have at least one line item")]
    EmptyLineItems { kind: &'static str },
}

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;
