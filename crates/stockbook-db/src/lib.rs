//! # stockbook-db: Storage Layer for Stockbook
//!
//! SQLite persistence for the Stockbook inventory manager, built on sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Route handler (apps/server)                                        │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  stockbook-db (THIS CRATE)                                          │
//! │                                                                     │
//! │   Store (pool.rs)     Repositories          Ledger (ledger.rs)      │
//! │   SqlitePool          items / clients /     record_sale             │
//! │   migrations          vendors CRUD          record_supply_order     │
//! │                                             (single transaction,    │
//! │   Reports (reports.rs)                       stock adjustment)      │
//! │   Snapshot (snapshot.rs)                                            │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite database (WAL mode, foreign_keys = ON)                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - `Store` handle and connection pool configuration
//! - [`migrations`] - embedded database migrations
//! - [`error`] - storage error types and sqlx error classification
//! - [`repository`] - per-entity CRUD (items, clients, vendors)
//! - [`ledger`] - transactional sale / supply-order recording
//! - [`reports`] - inventory and transaction summaries
//! - [`snapshot`] - point-in-time multi-table snapshot for export
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockbook_db::{DbConfig, Store};
//!
//! let store = Store::open(DbConfig::new("path/to/stockbook.db")).await?;
//! let sale = store.ledger().record_sale(request).await?;
//! let summary = store.reports().inventory_summary().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod migrations;
pub mod pool;
pub mod reports;
pub mod repository;
pub mod snapshot;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use ledger::Ledger;
pub use pool::{DbConfig, Store};
pub use reports::Reports;
pub use snapshot::{SnapshotExporter, TableSnapshot};

// Repository re-exports for convenience
pub use repository::client::ClientRepository;
pub use repository::item::ItemRepository;
pub use repository::vendor::VendorRepository;
