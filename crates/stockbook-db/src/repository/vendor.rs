//! # Vendor Repository
//!
//! Database operations for vendors. Mirrors the client repository;
//! supply orders recorded against a deleted vendor survive as
//! unassigned.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use stockbook_core::{NewVendorRequest, Vendor};

/// Repository for vendor operations.
#[derive(Debug, Clone)]
pub struct VendorRepository {
    pool: SqlitePool,
}

impl VendorRepository {
    /// Creates a new VendorRepository.
    pub fn new(pool: SqlitePool) -> Self {
        VendorRepository { pool }
    }

    /// Lists all vendors, ordered by name.
    pub async fn list(&self) -> StoreResult<Vec<Vendor>> {
        let vendors = sqlx::query_as::<_, Vendor>(
            r#"
            SELECT vendor_id, vendor_name, email, phone, address, notes, created_date
            FROM vendors
            ORDER BY vendor_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vendors)
    }

    /// Gets a vendor by id.
    pub async fn get_by_id(&self, id: i64) -> StoreResult<Option<Vendor>> {
        let vendor = sqlx::query_as::<_, Vendor>(
            r#"
            SELECT vendor_id, vendor_name, email, phone, address, notes, created_date
            FROM vendors
            WHERE vendor_id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vendor)
    }

    /// Creates a vendor and returns it as stored.
    pub async fn create(&self, req: &NewVendorRequest) -> StoreResult<Vendor> {
        req.validate()?;

        debug!(vendor_name = %req.vendor_name, "creating vendor");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO vendors (vendor_name, email, phone, address, notes, created_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(req.vendor_name.trim())
        .bind(&req.email)
        .bind(&req.phone)
        .bind(&req.address)
        .bind(&req.notes)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| StoreError::Internal(format!("inserted vendor {} not readable", id)))
    }

    /// Updates a vendor and returns the stored row.
    pub async fn update(&self, id: i64, req: &NewVendorRequest) -> StoreResult<Vendor> {
        req.validate()?;

        debug!(vendor_id = id, "updating vendor");

        let result = sqlx::query(
            r#"
            UPDATE vendors
            SET vendor_name = ?2, email = ?3, phone = ?4, address = ?5, notes = ?6
            WHERE vendor_id = ?1
            "#,
        )
        .bind(id)
        .bind(req.vendor_name.trim())
        .bind(&req.email)
        .bind(&req.phone)
        .bind(&req.address)
        .bind(&req.notes)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Vendor", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| StoreError::not_found("Vendor", id))
    }

    /// Deletes a vendor.
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        debug!(vendor_id = id, "deleting vendor");

        let result = sqlx::query("DELETE FROM vendors WHERE vendor_id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Vendor", id));
        }

        Ok(())
    }
}
