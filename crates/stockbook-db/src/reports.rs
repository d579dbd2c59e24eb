//! # Reports
//!
//! Read-only summaries computed directly from current table state.
//! There is no caching layer: every call re-reads, so results always
//! reflect the latest committed ledger state.

use sqlx::SqlitePool;

use crate::error::StoreResult;
use stockbook_core::{InventorySummary, TransactionSummary};

/// Reporting queries over the shared pool.
#[derive(Debug, Clone)]
pub struct Reports {
    pool: SqlitePool,
}

impl Reports {
    /// Creates a new Reports handle.
    pub fn new(pool: SqlitePool) -> Self {
        Reports { pool }
    }

    /// Current inventory valuation and low-stock count.
    ///
    /// All sums default to 0 when no items exist.
    pub async fn inventory_summary(&self) -> StoreResult<InventorySummary> {
        let (total_value, total_items): (Option<i64>, Option<i64>) = sqlx::query_as(
            r#"
            SELECT SUM(quantity * unit_price_cents), SUM(quantity)
            FROM inventory
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let low_stock_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM low_stock_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(InventorySummary {
            total_value_cents: total_value.unwrap_or(0),
            total_items: total_items.unwrap_or(0),
            low_stock_count,
        })
    }

    /// Revenue, cost and margin over all recorded transactions.
    ///
    /// All sums default to 0 when no rows exist; the margin may be
    /// negative.
    pub async fn transaction_summary(&self) -> StoreResult<TransactionSummary> {
        let sales_revenue: Option<i64> =
            sqlx::query_scalar("SELECT SUM(subtotal_cents) FROM sale_items")
                .fetch_one(&self.pool)
                .await?;

        let supply_cost: Option<i64> =
            sqlx::query_scalar("SELECT SUM(subtotal_cents) FROM supply_items")
                .fetch_one(&self.pool)
                .await?;

        let sales_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        let supply_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM supply_orders")
            .fetch_one(&self.pool)
            .await?;

        let sales_revenue = sales_revenue.unwrap_or(0);
        let supply_cost = supply_cost.unwrap_or(0);

        Ok(TransactionSummary {
            sales_revenue_cents: sales_revenue,
            supply_cost_cents: supply_cost,
            sales_count,
            supply_count,
            gross_margin_cents: sales_revenue - supply_cost,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
