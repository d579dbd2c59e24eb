//! # Validation Module
//!
//! Field-level validation rules shared by the request types.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Route handler (axum)                                      │
//! │  └── Type validation (JSON deserialization, serde defaults)         │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE (request.validate())                          │
//! │  └── Required fields, sign rules, non-empty batches                 │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  └── NOT NULL, CHECK and foreign key constraints                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation always runs before a transaction is opened, so a rejected
//! request is never partially applied.

use crate::error::{ValidationError, ValidationResult};
use crate::MAX_NAME_LEN;

/// Validates a required name field (item, client or vendor name).
///
/// The value is trimmed; an all-whitespace name counts as missing.
pub fn validate_name(field: &'static str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }

    if value.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an item's unit sale price. Must be strictly positive.
pub fn validate_item_price(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "unit_price_cents",
        });
    }

    Ok(())
}

/// Validates a line-item price (sale unit price or supply cost price).
/// Zero is allowed (free items, samples); negative is not.
pub fn validate_line_price(field: &'static str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::NegativeAmount { field });
    }

    Ok(())
}

/// Validates a line-item quantity. Must be strictly positive.
pub fn validate_line_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive { field: "quantity" });
    }

    Ok(())
}

/// Validates an item's initial stock quantity. Zero is the default.
pub fn validate_initial_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::NegativeAmount { field: "quantity" });
    }

    Ok(())
}

/// Validates a reorder level.
pub fn validate_reorder_level(level: i64) -> ValidationResult<()> {
    if level < 0 {
        return Err(ValidationError::NegativeAmount {
            field: "reorder_level",
        });
    }

    Ok(())
}
