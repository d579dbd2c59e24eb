//! # stockbook-core: Pure Domain Logic for Stockbook
//!
//! This crate is the heart of Stockbook. It contains the domain types and
//! the input validation rules as pure code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Stockbook Architecture                         │
//! │                                                                     │
//! │  apps/server (axum REST API)                                        │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  stockbook-db (SQLite repositories, ledger engine, reports)         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ★ stockbook-core (THIS CRATE) ★                                    │
//! │                                                                     │
//! │    types      money      requests      validation                   │
//! │    entities   Money      typed input   field rules                  │
//! │    view rows  (cents)    + defaults                                 │
//! │                                                                     │
//! │  NO I/O • NO DATABASE • NO NETWORK                                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (InventoryItem, Sale, SupplyOrder, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`requests`] - Typed request payloads with defaulting and validation
//! - [`validation`] - Field-level validation rules
//! - [`error`] - Domain error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod requests;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use money::Money;
pub use requests::{
    NewClientRequest, NewItemRequest, NewSaleLine, NewSaleRequest, NewSupplyLine,
    NewSupplyOrderRequest, NewVendorRequest, UpdateItemRequest,
};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Reorder level applied when an item is created or updated without one.
pub const DEFAULT_REORDER_LEVEL: i64 = 10;

/// Maximum length accepted for name fields (item, client, vendor).
pub const MAX_NAME_LEN: usize = 200;
