//! # Snapshot Export
//!
//! Read-only, point-in-time fetch of every table and view for an
//! external renderer (spreadsheet export, backup tooling). The store
//! owns the contract - a fixed list of named sources, each with an
//! explicit column order and row query - and fetches all of them inside
//! one transaction so the snapshot is consistent across tables.
//!
//! Rendering the result into a downloadable artifact is not this
//! crate's business; rows are returned as plain JSON values.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool, TypeInfo, ValueRef};

use crate::error::StoreResult;

/// One exportable table or view: name, column order, row query.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotSource {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    query: &'static str,
}

/// Everything the exporter serves, in sheet order: the seven tables
/// first, then the derived views.
pub const SNAPSHOT_SOURCES: &[SnapshotSource] = &[
    SnapshotSource {
        name: "inventory",
        columns: &[
            "item_id",
            "item_name",
            "description",
            "quantity",
            "unit_price_cents",
            "reorder_level",
            "notes",
            "created_date",
        ],
        query: "SELECT item_id, item_name, description, quantity, unit_price_cents, \
                reorder_level, notes, created_date FROM inventory ORDER BY item_id",
    },
    SnapshotSource {
        name: "clients",
        columns: &[
            "client_id",
            "client_name",
            "email",
            "phone",
            "address",
            "notes",
            "created_date",
        ],
        query: "SELECT client_id, client_name, email, phone, address, notes, created_date \
                FROM clients ORDER BY client_id",
    },
    SnapshotSource {
        name: "vendors",
        columns: &[
            "vendor_id",
            "vendor_name",
            "email",
            "phone",
            "address",
            "notes",
            "created_date",
        ],
        query: "SELECT vendor_id, vendor_name, email, phone, address, notes, created_date \
                FROM vendors ORDER BY vendor_id",
    },
    SnapshotSource {
        name: "sales",
        columns: &["sale_id", "client_id", "sale_date", "notes"],
        query: "SELECT sale_id, client_id, sale_date, notes FROM sales ORDER BY sale_id",
    },
    SnapshotSource {
        name: "sale_items",
        columns: &[
            "sale_item_id",
            "sale_id",
            "item_id",
            "quantity",
            "unit_price_cents",
            "notes",
            "subtotal_cents",
        ],
        query: "SELECT sale_item_id, sale_id, item_id, quantity, unit_price_cents, notes, \
                subtotal_cents FROM sale_items ORDER BY sale_item_id",
    },
    SnapshotSource {
        name: "supply_orders",
        columns: &["supply_order_id", "vendor_id", "order_date", "notes"],
        query: "SELECT supply_order_id, vendor_id, order_date, notes FROM supply_orders \
                ORDER BY supply_order_id",
    },
    SnapshotSource {
        name: "supply_items",
        columns: &[
            "supply_item_id",
            "supply_order_id",
            "item_id",
            "quantity",
            "cost_price_cents",
            "notes",
            "subtotal_cents",
        ],
        query: "SELECT supply_item_id, supply_order_id, item_id, quantity, cost_price_cents, \
                notes, subtotal_cents FROM supply_items ORDER BY supply_item_id",
    },
    // Views
    SnapshotSource {
        name: "low_stock_items",
        columns: &["item_id", "item_name", "quantity", "reorder_level", "notes"],
        query: "SELECT item_id, item_name, quantity, reorder_level, notes FROM low_stock_items \
                ORDER BY quantity ASC, item_id",
    },
    SnapshotSource {
        name: "sales_summary",
        columns: &["sale_id", "sale_date", "client_name", "sale_notes"],
        query: "SELECT sale_id, sale_date, client_name, sale_notes FROM sales_summary \
                ORDER BY sale_date DESC, sale_id DESC",
    },
    SnapshotSource {
        name: "sale_details",
        columns: &[
            "sale_item_id",
            "sale_id",
            "sale_date",
            "client_name",
            "item_name",
            "quantity",
            "unit_price_cents",
            "subtotal_cents",
            "sale_notes",
            "item_notes",
        ],
        query: "SELECT sale_item_id, sale_id, sale_date, client_name, item_name, quantity, \
                unit_price_cents, subtotal_cents, sale_notes, item_notes FROM sale_details \
                ORDER BY sale_date DESC, sale_item_id DESC",
    },
    SnapshotSource {
        name: "supply_order_summary",
        columns: &["supply_order_id", "order_date", "vendor_name", "order_notes"],
        query: "SELECT supply_order_id, order_date, vendor_name, order_notes \
                FROM supply_order_summary ORDER BY order_date DESC, supply_order_id DESC",
    },
    SnapshotSource {
        name: "supply_order_details",
        columns: &[
            "supply_item_id",
            "supply_order_id",
            "order_date",
            "vendor_name",
            "item_name",
            "quantity",
            "cost_price_cents",
            "subtotal_cents",
            "order_notes",
            "item_notes",
        ],
        query: "SELECT supply_item_id, supply_order_id, order_date, vendor_name, item_name, \
                quantity, cost_price_cents, subtotal_cents, order_notes, item_notes \
                FROM supply_order_details ORDER BY order_date DESC, supply_item_id DESC",
    },
];

/// One fetched table/view: name, ordered columns, rows as JSON values
/// in column order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Fetches the full snapshot over the shared pool.
#[derive(Debug, Clone)]
pub struct SnapshotExporter {
    pool: SqlitePool,
}

impl SnapshotExporter {
    /// Creates a new SnapshotExporter.
    pub fn new(pool: SqlitePool) -> Self {
        SnapshotExporter { pool }
    }

    /// Fetches every source inside one read transaction, so the
    /// returned tables are consistent with each other even while writes
    /// are happening.
    pub async fn fetch(&self) -> StoreResult<Vec<TableSnapshot>> {
        let mut tx = self.pool.begin().await?;

        let mut tables = Vec::with_capacity(SNAPSHOT_SOURCES.len());

        for source in SNAPSHOT_SOURCES {
            let rows = sqlx::query(source.query).fetch_all(&mut *tx).await?;

            let mut decoded = Vec::with_capacity(rows.len());
            for row in &rows {
                let mut values = Vec::with_capacity(source.columns.len());
                for idx in 0..source.columns.len() {
                    values.push(decode_value(row, idx)?);
                }
                decoded.push(values);
            }

            tables.push(TableSnapshot {
                name: source.name.to_string(),
                columns: source.columns.iter().map(|c| c.to_string()).collect(),
                rows: decoded,
            });
        }

        tx.commit().await?;

        Ok(tables)
    }
}

/// Decodes one column of a dynamically-typed row into a JSON value,
/// based on the SQLite storage class of the stored value.
fn decode_value(row: &SqliteRow, idx: usize) -> StoreResult<Value> {
    let type_name = {
        let raw = row.try_get_raw(idx)?;
        if raw.is_null() {
            return Ok(Value::Null);
        }
        raw.type_info().name().to_string()
    };

    let value = match type_name.as_str() {
        "INTEGER" | "BOOLEAN" => Value::from(row.try_get::<i64, _>(idx)?),
        "REAL" | "NUMERIC" => Value::from(row.try_get::<f64, _>(idx)?),
        // no BLOB columns exist in this schema
        "BLOB" => Value::Null,
        _ => Value::from(row.try_get::<String, _>(idx)?),
    };

    Ok(value)
}

// =============================================================================
// Unit Tests
// =============================================================================
