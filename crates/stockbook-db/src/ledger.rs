//! # Ledger Engine
//!
//! The one multi-statement, atomic business operation in Stockbook:
//! recording a transaction (sale or supply order) consisting of a header
//! plus one or more line items, with a correlated stock adjustment.
//!
//! ## Recording a Sale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  record_sale(request)                                               │
//! │                                                                     │
//! │  1. validate request          ── ValidationError, nothing applied   │
//! │  2. BEGIN                                                           │
//! │  3. INSERT sale header                                              │
//! │  4. per line, in input order:                                       │
//! │       UPDATE inventory SET quantity = quantity - line.quantity      │
//! │         ├── 0 rows        → NotFound, rollback                      │
//! │         ├── CHECK fails   → StockConstraint, rollback               │
//! │       INSERT sale_items row (subtotal stored)                       │
//! │  5. COMMIT                                                          │
//! │  6. return the hydrated sale as stored                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any error exit path abandons the transaction before it is committed;
//! sqlx rolls back on drop, so no partial sale and no partial stock
//! decrement is ever observable. Supply orders are the structural
//! mirror: quantity is incremented and there is no stock floor.
//!
//! Line items are applied exactly in caller order. Repeated `item_id`s
//! are not deduplicated; each occurrence adjusts stock independently and
//! the effects accumulate.
//!
//! Deleting a sale or supply order removes the header and cascades to
//! its line items, but deliberately does NOT reverse the stock
//! adjustment: the ledger records what stock actually did.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use stockbook_core::{
    Money, NewSaleRequest, NewSupplyOrderRequest, Sale, SaleDetailRow, SaleSummaryRow,
    SaleWithItems, SupplyDetailRow, SupplyOrder, SupplyOrderSummaryRow, SupplyOrderWithItems,
};

/// The ledger engine. The only component that mutates stock levels.
#[derive(Debug, Clone)]
pub struct Ledger {
    pool: SqlitePool,
}

impl Ledger {
    /// Creates a new Ledger over the shared pool.
    pub fn new(pool: SqlitePool) -> Self {
        Ledger { pool }
    }

    // =========================================================================
    // Sales
    // =========================================================================

    /// Records a sale: header + line items + stock decrements, in one
    /// transaction.
    ///
    /// ## Errors
    /// * `Validation` - empty batch or invalid line values; raised
    ///   before the transaction opens
    /// * `NotFound` - a line references a nonexistent item
    /// * `StockConstraint` - the cumulative decrement would drive some
    ///   item's quantity below zero
    ///
    /// Every error leaves the ledger and all stock levels exactly as
    /// they were before the call.
    pub async fn record_sale(&self, req: &NewSaleRequest) -> StoreResult<SaleWithItems> {
        req.validate()?;

        debug!(lines = req.items.len(), client_id = ?req.client_id, "recording sale");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let header = sqlx::query(
            r#"
            INSERT INTO sales (client_id, sale_date, notes)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(req.client_id)
        .bind(now)
        .bind(&req.notes)
        .execute(&mut *tx)
        .await?;

        let sale_id = header.last_insert_rowid();

        for line in &req.items {
            // The stock_not_negative CHECK aborts the statement (and
            // with it the whole sale) on an oversell.
            let adjusted = sqlx::query(
                r#"
                UPDATE inventory
                SET quantity = quantity - ?2
                WHERE item_id = ?1
                "#,
            )
            .bind(line.item_id)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?;

            if adjusted.rows_affected() == 0 {
                // Dropping the transaction rolls back the header and any
                // previously applied lines.
                return Err(StoreError::not_found("InventoryItem", line.item_id));
            }

            let subtotal = Money::from_cents(line.unit_price_cents).line_total(line.quantity);

            sqlx::query(
                r#"
                INSERT INTO sale_items (
                    sale_id, item_id, quantity, unit_price_cents, notes, subtotal_cents
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(sale_id)
            .bind(line.item_id)
            .bind(line.quantity)
            .bind(line.unit_price_cents)
            .bind(&line.notes)
            .bind(subtotal.cents())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(sale_id, lines = req.items.len(), "sale recorded");

        self.get_sale(sale_id)
            .await?
            .ok_or_else(|| StoreError::Internal(format!("recorded sale {} not readable", sale_id)))
    }

    /// Gets a sale with its line items.
    pub async fn get_sale(&self, id: i64) -> StoreResult<Option<SaleWithItems>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT sale_id, client_id, sale_date, notes
            FROM sales
            WHERE sale_id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(sale) = sale else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, SaleDetailRow>(
            r#"
            SELECT sale_item_id, sale_id, sale_date, client_name, item_name,
                   quantity, unit_price_cents, subtotal_cents, sale_notes, item_notes
            FROM sale_details
            WHERE sale_id = ?1
            ORDER BY sale_item_id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(SaleWithItems { sale, items }))
    }

    /// Lists sale headers with client names, most recent first.
    pub async fn list_sales(&self) -> StoreResult<Vec<SaleSummaryRow>> {
        let rows = sqlx::query_as::<_, SaleSummaryRow>(
            r#"
            SELECT sale_id, sale_date, client_name, sale_notes
            FROM sales_summary
            ORDER BY sale_date DESC, sale_id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Lists every sale line item joined for display, most recent first.
    pub async fn sale_details(&self) -> StoreResult<Vec<SaleDetailRow>> {
        let rows = sqlx::query_as::<_, SaleDetailRow>(
            r#"
            SELECT sale_item_id, sale_id, sale_date, client_name, item_name,
                   quantity, unit_price_cents, subtotal_cents, sale_notes, item_notes
            FROM sale_details
            ORDER BY sale_date DESC, sale_item_id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Deletes a sale. Line items cascade-delete; the stock decrement is
    /// NOT reversed.
    pub async fn delete_sale(&self, id: i64) -> StoreResult<()> {
        debug!(sale_id = id, "deleting sale");

        let result = sqlx::query("DELETE FROM sales WHERE sale_id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Sale", id));
        }

        Ok(())
    }

    // =========================================================================
    // Supply Orders
    // =========================================================================

    /// Records a supply order: header + line items + stock increments,
    /// in one transaction.
    ///
    /// Mirror of [`record_sale`](Self::record_sale) without the stock
    /// floor - a supply order always succeeds on quantity grounds.
    pub async fn record_supply_order(
        &self,
        req: &NewSupplyOrderRequest,
    ) -> StoreResult<SupplyOrderWithItems> {
        req.validate()?;

        debug!(lines = req.items.len(), vendor_id = ?req.vendor_id, "recording supply order");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let header = sqlx::query(
            r#"
            INSERT INTO supply_orders (vendor_id, order_date, notes)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(req.vendor_id)
        .bind(now)
        .bind(&req.notes)
        .execute(&mut *tx)
        .await?;

        let order_id = header.last_insert_rowid();

        for line in &req.items {
            let adjusted = sqlx::query(
                r#"
                UPDATE inventory
                SET quantity = quantity + ?2
                WHERE item_id = ?1
                "#,
            )
            .bind(line.item_id)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?;

            if adjusted.rows_affected() == 0 {
                return Err(StoreError::not_found("InventoryItem", line.item_id));
            }

            let subtotal = Money::from_cents(line.cost_price_cents).line_total(line.quantity);

            sqlx::query(
                r#"
                INSERT INTO supply_items (
                    supply_order_id, item_id, quantity, cost_price_cents, notes, subtotal_cents
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(order_id)
            .bind(line.item_id)
            .bind(line.quantity)
            .bind(line.cost_price_cents)
            .bind(&line.notes)
            .bind(subtotal.cents())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(supply_order_id = order_id, lines = req.items.len(), "supply order recorded");

        self.get_supply_order(order_id).await?.ok_or_else(|| {
            StoreError::Internal(format!("recorded supply order {} not readable", order_id))
        })
    }

    /// Gets a supply order with its line items.
    pub async fn get_supply_order(&self, id: i64) -> StoreResult<Option<SupplyOrderWithItems>> {
        let order = sqlx::query_as::<_, SupplyOrder>(
            r#"
            SELECT supply_order_id, vendor_id, order_date, notes
            FROM supply_orders
            WHERE supply_order_id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, SupplyDetailRow>(
            r#"
            SELECT supply_item_id, supply_order_id, order_date, vendor_name, item_name,
                   quantity, cost_price_cents, subtotal_cents, order_notes, item_notes
            FROM supply_order_details
            WHERE supply_order_id = ?1
            ORDER BY supply_item_id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(SupplyOrderWithItems { order, items }))
    }

    /// Lists supply order headers with vendor names, most recent first.
    pub async fn list_supply_orders(&self) -> StoreResult<Vec<SupplyOrderSummaryRow>> {
        let rows = sqlx::query_as::<_, SupplyOrderSummaryRow>(
            r#"
            SELECT supply_order_id, order_date, vendor_name, order_notes
            FROM supply_order_summary
            ORDER BY order_date DESC, supply_order_id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Lists every supply line item joined for display, most recent
    /// first.
    pub async fn supply_order_details(&self) -> StoreResult<Vec<SupplyDetailRow>> {
        let rows = sqlx::query_as::<_, SupplyDetailRow>(
            r#"
            SELECT supply_item_id, supply_order_id, order_date, vendor_name, item_name,
                   quantity, cost_price_cents, subtotal_cents, order_notes, item_notes
            FROM supply_order_details
            ORDER BY order_date DESC, supply_item_id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Deletes a supply order. Line items cascade-delete; the stock
    /// increment is NOT reversed.
    pub async fn delete_supply_order(&self, id: i64) -> StoreResult<()> {
        debug!(supply_order_id = id, "deleting supply order");

        let result = sqlx::query("DELETE FROM supply_orders WHERE supply_order_id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("SupplyOrder", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{DbConfig, Store};
    use stockbook_core::{NewItemRequest, NewSaleLine, NewSupplyLine};

    async fn test_store() -> Store {
        Store::open(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_item(store: &Store, name: &str, quantity: i64, price_cents: i64) -> i64 {
        store
            .items()
            .create(&NewItemRequest {
                item_name: name.to_string(),
                description: None,
                quantity,
                unit_price_cents: price_cents,
                reorder_level: 3,
                notes: None,
            })
            .await
            .unwrap()
            .item_id
    }

    async fn stock_of(store: &Store, item_id: i64) -> i64 {
        store
            .items()
            .get_by_id(item_id)
            .await
            .unwrap()
            .unwrap()
            .quantity
    }

    async fn count(store: &Store, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(store.pool())
            .await
            .unwrap()
    }

    fn sale_line(item_id: i64, quantity: i64, unit_price_cents: i64) -> NewSaleLine {
        NewSaleLine {
            item_id,
            quantity,
            unit_price_cents,
            notes: None,
        }
    }

    fn sale_of(lines: Vec<NewSaleLine>) -> NewSaleRequest {
        NewSaleRequest {
            client_id: None,
            notes: None,
            items: lines,
        }
    }

    #[tokio::test]
    async fn record_sale_decrements_stock_and_stores_subtotals() {
        let store = test_store().await;
        let item = seed_item(&store, "Widget", 5, 1000).await;

        let sale = store
            .ledger()
            .record_sale(&sale_of(vec![sale_line(item, 3, 1000)]))
            .await
            .unwrap();

        assert_eq!(sale.items.len(), 1);
        assert_eq!(sale.items[0].quantity, 3);
        assert_eq!(sale.items[0].subtotal_cents, 3000);
        assert!(sale.sale.client_id.is_none());

        assert_eq!(stock_of(&store, item).await, 2);
    }

    #[tokio::test]
    async fn empty_batch_is_rejected_before_any_write() {
        let store = test_store().await;

        let err = store.ledger().record_sale(&sale_of(vec![])).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        assert_eq!(count(&store, "sales").await, 0);
    }

    #[tokio::test]
    async fn oversell_fails_with_stock_constraint_and_rolls_back() {
        let store = test_store().await;
        let item = seed_item(&store, "Widget", 2, 1000).await;

        let err = store
            .ledger()
            .record_sale(&sale_of(vec![sale_line(item, 3, 1000)]))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::StockConstraint { .. }));
        assert_eq!(stock_of(&store, item).await, 2);
        assert_eq!(count(&store, "sales").await, 0);
        assert_eq!(count(&store, "sale_items").await, 0);
    }

    #[tokio::test]
    async fn failing_line_rolls_back_earlier_lines() {
        let store = test_store().await;
        let a = seed_item(&store, "A", 5, 1000).await;
        let b = seed_item(&store, "B", 1, 500).await;

        // first line would succeed on its own; second line oversells B
        let err = store
            .ledger()
            .record_sale(&sale_of(vec![sale_line(a, 2, 1000), sale_line(b, 5, 500)]))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::StockConstraint { .. }));
        assert_eq!(stock_of(&store, a).await, 5);
        assert_eq!(stock_of(&store, b).await, 1);
        assert_eq!(count(&store, "sales").await, 0);
        assert_eq!(count(&store, "sale_items").await, 0);
    }

    #[tokio::test]
    async fn unknown_item_rolls_back_whole_sale() {
        let store = test_store().await;
        let a = seed_item(&store, "A", 5, 1000).await;

        let err = store
            .ledger()
            .record_sale(&sale_of(vec![sale_line(a, 1, 1000), sale_line(777, 1, 100)]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::NotFound {
                entity: "InventoryItem",
                id: 777
            }
        ));
        assert_eq!(stock_of(&store, a).await, 5);
        assert_eq!(count(&store, "sales").await, 0);
    }

    #[tokio::test]
    async fn repeated_item_lines_accumulate() {
        let store = test_store().await;
        let item = seed_item(&store, "Widget", 5, 1000).await;

        let sale = store
            .ledger()
            .record_sale(&sale_of(vec![sale_line(item, 2, 1000), sale_line(item, 2, 900)]))
            .await
            .unwrap();

        assert_eq!(sale.items.len(), 2);
        assert_eq!(stock_of(&store, item).await, 1);

        // cumulative decrement within one call counts against the floor
        let err = store
            .ledger()
            .record_sale(&sale_of(vec![sale_line(item, 1, 1000), sale_line(item, 1, 1000)]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::StockConstraint { .. }));
        assert_eq!(stock_of(&store, item).await, 1);
    }

    #[tokio::test]
    async fn supply_order_increments_stock_without_floor() {
        let store = test_store().await;
        let item = seed_item(&store, "Widget", 0, 1000).await;

        let order = store
            .ledger()
            .record_supply_order(&NewSupplyOrderRequest {
                vendor_id: None,
                notes: Some("restock".to_string()),
                items: vec![NewSupplyLine {
                    item_id: item,
                    quantity: 10,
                    cost_price_cents: 400,
                    notes: None,
                }],
            })
            .await
            .unwrap();

        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].subtotal_cents, 4000);
        assert_eq!(stock_of(&store, item).await, 10);
    }

    #[tokio::test]
    async fn deleting_a_sale_cascades_but_never_restocks() {
        let store = test_store().await;
        let item = seed_item(&store, "Widget", 5, 1000).await;

        let kept = store
            .ledger()
            .record_sale(&sale_of(vec![sale_line(item, 1, 1000)]))
            .await
            .unwrap();
        let deleted = store
            .ledger()
            .record_sale(&sale_of(vec![sale_line(item, 2, 1000)]))
            .await
            .unwrap();
        assert_eq!(stock_of(&store, item).await, 2);

        store.ledger().delete_sale(deleted.sale.sale_id).await.unwrap();

        // header and its lines gone, other sale's lines untouched
        assert!(store.ledger().get_sale(deleted.sale.sale_id).await.unwrap().is_none());
        assert_eq!(count(&store, "sale_items").await, 1);
        let kept = store.ledger().get_sale(kept.sale.sale_id).await.unwrap().unwrap();
        assert_eq!(kept.items.len(), 1);

        // explicit policy: deletion does not reverse the decrement
        assert_eq!(stock_of(&store, item).await, 2);
    }

    #[tokio::test]
    async fn deleting_a_supply_order_does_not_destock() {
        let store = test_store().await;
        let item = seed_item(&store, "Widget", 0, 1000).await;

        let order = store
            .ledger()
            .record_supply_order(&NewSupplyOrderRequest {
                vendor_id: None,
                notes: None,
                items: vec![NewSupplyLine {
                    item_id: item,
                    quantity: 4,
                    cost_price_cents: 250,
                    notes: None,
                }],
            })
            .await
            .unwrap();

        store
            .ledger()
            .delete_supply_order(order.order.supply_order_id)
            .await
            .unwrap();

        assert_eq!(count(&store, "supply_items").await, 0);
        assert_eq!(stock_of(&store, item).await, 4);
    }

    #[tokio::test]
    async fn delete_missing_transaction_is_not_found() {
        let store = test_store().await;

        assert!(matches!(
            store.ledger().delete_sale(99).await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.ledger().delete_supply_order(99).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn listings_are_most_recent_first() {
        let store = test_store().await;
        let item = seed_item(&store, "Widget", 10, 1000).await;

        let first = store
            .ledger()
            .record_sale(&sale_of(vec![sale_line(item, 1, 1000)]))
            .await
            .unwrap();
        let second = store
            .ledger()
            .record_sale(&sale_of(vec![sale_line(item, 1, 1000)]))
            .await
            .unwrap();

        let listed = store.ledger().list_sales().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].sale_id, second.sale.sale_id);
        assert_eq!(listed[1].sale_id, first.sale.sale_id);
    }

    #[tokio::test]
    async fn sale_summary_carries_client_name() {
        let store = test_store().await;
        let item = seed_item(&store, "Widget", 10, 1000).await;

        let client = store
            .clients()
            .create(&stockbook_core::NewClientRequest {
                client_name: "Acme Ltd".to_string(),
                email: None,
                phone: None,
                address: None,
                notes: None,
            })
            .await
            .unwrap();

        store
            .ledger()
            .record_sale(&NewSaleRequest {
                client_id: Some(client.client_id),
                notes: None,
                items: vec![sale_line(item, 1, 1000)],
            })
            .await
            .unwrap();

        let listed = store.ledger().list_sales().await.unwrap();
        assert_eq!(listed[0].client_name.as_deref(), Some("Acme Ltd"));

        // deleting the client demotes the sale to a walk-in
        store.clients().delete(client.client_id).await.unwrap();
        let listed = store.ledger().list_sales().await.unwrap();
        assert_eq!(listed[0].client_name, None);
    }
}
