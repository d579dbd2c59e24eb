//! # Item Repository
//!
//! Database operations for inventory items.
//!
//! The one rule here: `quantity` is written exactly once, at creation,
//! from the validated initial value. Updates never touch it - stock
//! moves only when the ledger records a sale or supply order.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use stockbook_core::{InventoryItem, LowStockItem, NewItemRequest, UpdateItemRequest};

/// Repository for inventory item operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Lists all items, ordered by name.
    pub async fn list(&self) -> StoreResult<Vec<InventoryItem>> {
        let items = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT item_id, item_name, description, quantity,
                   unit_price_cents, reorder_level, notes, created_date
            FROM inventory
            ORDER BY item_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets an item by id.
    ///
    /// ## Returns
    /// * `Ok(Some(item))` - item found
    /// * `Ok(None)` - no such item
    pub async fn get_by_id(&self, id: i64) -> StoreResult<Option<InventoryItem>> {
        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT item_id, item_name, description, quantity,
                   unit_price_cents, reorder_level, notes, created_date
            FROM inventory
            WHERE item_id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Lists items at or below their reorder level, lowest stock first.
    pub async fn low_stock(&self) -> StoreResult<Vec<LowStockItem>> {
        let items = sqlx::query_as::<_, LowStockItem>(
            r#"
            SELECT item_id, item_name, quantity, reorder_level, notes
            FROM low_stock_items
            ORDER BY quantity ASC, item_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Creates an item and returns it as stored.
    ///
    /// Defaults already applied by the request type: quantity 0,
    /// reorder_level 10.
    pub async fn create(&self, req: &NewItemRequest) -> StoreResult<InventoryItem> {
        req.validate()?;

        debug!(item_name = %req.item_name, "creating inventory item");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO inventory (
                item_name, description, quantity,
                unit_price_cents, reorder_level, notes, created_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(req.item_name.trim())
        .bind(&req.description)
        .bind(req.quantity)
        .bind(req.unit_price_cents)
        .bind(req.reorder_level)
        .bind(&req.notes)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| StoreError::Internal(format!("inserted item {} not readable", id)))
    }

    /// Updates an item's descriptive fields and returns the stored row.
    ///
    /// `quantity` is intentionally absent from the UPDATE: only the
    /// ledger engine may change stock levels.
    pub async fn update(&self, id: i64, req: &UpdateItemRequest) -> StoreResult<InventoryItem> {
        req.validate()?;

        debug!(item_id = id, "updating inventory item");

        let result = sqlx::query(
            r#"
            UPDATE inventory
            SET item_name = ?2,
                description = ?3,
                unit_price_cents = ?4,
                reorder_level = ?5,
                notes = ?6
            WHERE item_id = ?1
            "#,
        )
        .bind(id)
        .bind(req.item_name.trim())
        .bind(&req.description)
        .bind(req.unit_price_cents)
        .bind(req.reorder_level)
        .bind(&req.notes)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("InventoryItem", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| StoreError::not_found("InventoryItem", id))
    }

    /// Deletes an item.
    ///
    /// Fails with `ReferentialConflict` while any sale or supply line
    /// item still references it (foreign keys RESTRICT - no silent
    /// cascade into history).
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        debug!(item_id = id, "deleting inventory item");

        let result = sqlx::query("DELETE FROM inventory WHERE item_id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("InventoryItem", id));
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
    use stockbook_core::{NewSupplyLine, NewSupplyOrderRequest};

    async fn test_store() -> Store {
        Store::open(DbConfig::in_memory()).await.unwrap()
    }

    fn bolt() -> NewItemRequest {
        NewItemRequest {
            item_name: "Bolt M6".to_string(),
            description: Some("Hex bolt".to_string()),
            quantity: 0,
            unit_price_cents: 250,
            reorder_level: 10,
            notes: None,
        }
    }

    #[tokio::test]
    async fn create_and_fetch() {
        let store = test_store().await;
        let repo = store.items();

        let created = repo.create(&bolt()).await.unwrap();
        assert_eq!(created.item_name, "Bolt M6");
        assert_eq!(created.quantity, 0);
        assert_eq!(created.reorder_level, 10);

        let fetched = repo.get_by_id(created.item_id).await.unwrap().unwrap();
        assert_eq!(fetched.item_id, created.item_id);
        assert_eq!(fetched.unit_price_cents, 250);

        assert!(repo.get_by_id(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_rejects_invalid_input() {
        let store = test_store().await;
        let repo = store.items();

        let mut req = bolt();
        req.item_name = "  ".to_string();
        assert!(matches!(
            repo.create(&req).await,
            Err(StoreError::Validation(_))
        ));

        let mut req = bolt();
        req.unit_price_cents = 0;
        assert!(matches!(
            repo.create(&req).await,
            Err(StoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn update_does_not_touch_quantity() {
        let store = test_store().await;
        let repo = store.items();

        let mut req = bolt();
        req.quantity = 7;
        let created = repo.create(&req).await.unwrap();
        assert_eq!(created.quantity, 7);

        let updated = repo
            .update(
                created.item_id,
                &UpdateItemRequest {
                    item_name: "Bolt M8".to_string(),
                    description: None,
                    unit_price_cents: 300,
                    reorder_level: 5,
                    notes: Some("renamed".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.item_name, "Bolt M8");
        assert_eq!(updated.unit_price_cents, 300);
        // stock level survives every update
        assert_eq!(updated.quantity, 7);
    }

    #[tokio::test]
    async fn update_missing_item_is_not_found() {
        let store = test_store().await;

        let err = store
            .items()
            .update(
                1234,
                &UpdateItemRequest {
                    item_name: "Ghost".to_string(),
                    description: None,
                    unit_price_cents: 100,
                    reorder_level: 10,
                    notes: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_referenced_item_is_rejected() {
        let store = test_store().await;
        let repo = store.items();

        let item = repo.create(&bolt()).await.unwrap();

        // reference the item from a supply order line
        store
            .ledger()
            .record_supply_order(&NewSupplyOrderRequest {
                vendor_id: None,
                notes: None,
                items: vec![NewSupplyLine {
                    item_id: item.item_id,
                    quantity: 5,
                    cost_price_cents: 100,
                    notes: None,
                }],
            })
            .await
            .unwrap();

        let err = repo.delete(item.item_id).await.unwrap_err();
        assert!(matches!(err, StoreError::ReferentialConflict { .. }));

        // the item is still there
        assert!(repo.get_by_id(item.item_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_unreferenced_item_succeeds() {
        let store = test_store().await;
        let repo = store.items();

        let item = repo.create(&bolt()).await.unwrap();
        repo.delete(item.item_id).await.unwrap();
        assert!(repo.get_by_id(item.item_id).await.unwrap().is_none());

        assert!(matches!(
            repo.delete(item.item_id).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn low_stock_boundary_is_inclusive() {
        let store = test_store().await;
        let repo = store.items();

        let mut at_level = bolt();
        at_level.item_name = "At level".to_string();
        at_level.quantity = 10;
        repo.create(&at_level).await.unwrap();

        let mut above = bolt();
        above.item_name = "Above level".to_string();
        above.quantity = 11;
        repo.create(&above).await.unwrap();

        let low = repo.low_stock().await.unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].item_name, "At level");
    }
}
