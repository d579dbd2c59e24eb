//! # Domain Types
//!
//! Core domain types used throughout Stockbook.
//!
//! ## Entity Relationships
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Client 1──N Sale 1──N SaleLineItem N──1 InventoryItem              │
//! │  Vendor 1──N SupplyOrder 1──N SupplyLineItem N──1 InventoryItem     │
//! │                                                                     │
//! │  A Sale / SupplyOrder exclusively owns its line items               │
//! │  (cascade delete). An InventoryItem is shared by many line items    │
//! │  and never owned by them (delete is RESTRICTed while referenced).   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All identifiers are opaque `i64` rowids assigned by the store. All
//! monetary fields are integer cents (see [`crate::money::Money`]).
//! `quantity` on an item is only ever mutated by the ledger engine,
//! never by a direct update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Inventory
// =============================================================================

/// A stocked item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InventoryItem {
    pub item_id: i64,
    pub item_name: String,
    pub description: Option<String>,
    /// Current stock level. Never negative; adjusted only through the
    /// ledger engine as part of recording a sale or supply order.
    pub quantity: i64,
    /// Unit sale price in cents. Always > 0.
    pub unit_price_cents: i64,
    /// Stock level at or below which the item counts as low stock.
    pub reorder_level: i64,
    pub notes: Option<String>,
    pub created_date: DateTime<Utc>,
}

impl InventoryItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Whether the item is at or below its reorder level.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_level
    }
}

// =============================================================================
// Clients & Vendors
// =============================================================================

/// A client a sale can be attributed to. Sales without a client are
/// walk-in sales.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Client {
    pub client_id: i64,
    pub client_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub created_date: DateTime<Utc>,
}

/// A vendor a supply order can be attributed to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Vendor {
    pub vendor_id: i64,
    pub vendor_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub created_date: DateTime<Utc>,
}

// =============================================================================
// Sales
// =============================================================================

/// A recorded sale header. Immutable after creation except for
/// whole-record deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub sale_id: i64,
    /// `None` = walk-in sale.
    pub client_id: Option<i64>,
    pub sale_date: DateTime<Utc>,
    pub notes: Option<String>,
}

/// A line item belonging to exactly one sale.
///
/// Creating it decrements the referenced item's quantity by `quantity`
/// in the same transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleLineItem {
    pub sale_item_id: i64,
    pub sale_id: i64,
    pub item_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub notes: Option<String>,
    /// quantity × unit_price_cents, computed and stored at write time.
    pub subtotal_cents: i64,
}

impl SaleLineItem {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }
}

// =============================================================================
// Supply Orders
// =============================================================================

/// A recorded supply (purchase) order header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SupplyOrder {
    pub supply_order_id: i64,
    /// `None` = unassigned.
    pub vendor_id: Option<i64>,
    pub order_date: DateTime<Utc>,
    pub notes: Option<String>,
}

/// A line item belonging to exactly one supply order.
///
/// Creating it increments the referenced item's quantity by `quantity`
/// in the same transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SupplyLineItem {
    pub supply_item_id: i64,
    pub supply_order_id: i64,
    pub item_id: i64,
    pub quantity: i64,
    pub cost_price_cents: i64,
    pub notes: Option<String>,
    pub subtotal_cents: i64,
}

impl SupplyLineItem {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }
}

// =============================================================================
// View Rows
// =============================================================================
// Rows produced by the live reporting views. These are read-only shapes;
// the views are recomputed on every query, never materialized.

/// Row of the `low_stock_items` view: items where quantity has fallen to
/// or below the reorder level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct LowStockItem {
    pub item_id: i64,
    pub item_name: String,
    pub quantity: i64,
    pub reorder_level: i64,
    pub notes: Option<String>,
}

/// Row of the `sales_summary` view: sale headers joined with the client
/// name for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleSummaryRow {
    pub sale_id: i64,
    pub sale_date: DateTime<Utc>,
    /// `None` for walk-in sales.
    pub client_name: Option<String>,
    pub sale_notes: Option<String>,
}

/// Row of the `sale_details` view: line items joined with their sale and
/// the sold item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleDetailRow {
    pub sale_item_id: i64,
    pub sale_id: i64,
    pub sale_date: DateTime<Utc>,
    pub client_name: Option<String>,
    pub item_name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub subtotal_cents: i64,
    pub sale_notes: Option<String>,
    pub item_notes: Option<String>,
}

/// Row of the `supply_order_summary` view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SupplyOrderSummaryRow {
    pub supply_order_id: i64,
    pub order_date: DateTime<Utc>,
    pub vendor_name: Option<String>,
    pub order_notes: Option<String>,
}

/// Row of the `supply_order_details` view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SupplyDetailRow {
    pub supply_item_id: i64,
    pub supply_order_id: i64,
    pub order_date: DateTime<Utc>,
    pub vendor_name: Option<String>,
    pub item_name: String,
    pub quantity: i64,
    pub cost_price_cents: i64,
    pub subtotal_cents: i64,
    pub order_notes: Option<String>,
    pub item_notes: Option<String>,
}

// =============================================================================
// Hydrated Aggregates
// =============================================================================

/// A sale header together with its line items, as returned by the ledger
/// engine after recording or on lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleWithItems {
    #[serde(flatten)]
    pub sale: Sale,
    pub items: Vec<SaleDetailRow>,
}

/// A supply order header together with its line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplyOrderWithItems {
    #[serde(flatten)]
    pub order: SupplyOrder,
    pub items: Vec<SupplyDetailRow>,
}

// =============================================================================
// Report Payloads
// =============================================================================

/// Aggregate snapshot of current inventory. All sums are zero when no
/// items exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    /// Sum over all items of quantity × unit_price_cents.
    pub total_value_cents: i64,
    /// Sum of all quantities.
    pub total_items: i64,
    /// Count of items at or below their reorder level.
    pub low_stock_count: i64,
}

/// Aggregate snapshot of recorded transactions. All sums are zero when
/// no rows exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSummary {
    /// Sum of all sale line-item subtotals.
    pub sales_revenue_cents: i64,
    /// Sum of all supply line-item subtotals.
    pub supply_cost_cents: i64,
    pub sales_count: i64,
    pub supply_count: i64,
    /// sales_revenue − supply_cost. May be negative.
    pub gross_margin_cents: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i64, reorder_level: i64) -> InventoryItem {
        InventoryItem {
            item_id: 1,
            item_name: "Widget".to_string(),
            description: None,
            quantity,
            unit_price_cents: 1000,
            reorder_level,
            notes: None,
            created_date: Utc::now(),
        }
    }

    #[test]
    fn low_stock_boundary_is_inclusive() {
        assert!(item(3, 3).is_low_stock());
        assert!(item(0, 3).is_low_stock());
        assert!(!item(4, 3).is_low_stock());
    }

    #[test]
    fn line_item_subtotal_accessor() {
        let line = SaleLineItem {
            sale_item_id: 1,
            sale_id: 1,
            item_id: 1,
            quantity: 3,
            unit_price_cents: 1000,
            notes: None,
            subtotal_cents: 3000,
        };
        assert_eq!(line.subtotal(), Money::from_cents(3000));
    }
}
