//! # Client Repository
//!
//! Database operations for clients. Create and update share the same
//! payload shape; a client row carries contact details only.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use stockbook_core::{Client, NewClientRequest};

/// Repository for client operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ClientRepository { pool }
    }

    /// Lists all clients, ordered by name.
    pub async fn list(&self) -> StoreResult<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT client_id, client_name, email, phone, address, notes, created_date
            FROM clients
            ORDER BY client_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    /// Gets a client by id.
    pub async fn get_by_id(&self, id: i64) -> StoreResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT client_id, client_name, email, phone, address, notes, created_date
            FROM clients
            WHERE client_id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    /// Creates a client and returns it as stored.
    pub async fn create(&self, req: &NewClientRequest) -> StoreResult<Client> {
        req.validate()?;

        debug!(client_name = %req.client_name, "creating client");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO clients (client_name, email, phone, address, notes, created_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(req.client_name.trim())
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
            .ok_or_else(|| StoreError::Internal(format!("inserted client {} not readable", id)))
    }

    /// Updates a client and returns the stored row.
    pub async fn update(&self, id: i64, req: &NewClientRequest) -> StoreResult<Client> {
        req.validate()?;

        debug!(client_id = id, "updating client");

        let result = sqlx::query(
            r#"
            UPDATE clients
            SET client_name = ?2, email = ?3, phone = ?4, address = ?5, notes = ?6
            WHERE client_id = ?1
            "#,
        )
        .bind(id)
        .bind(req.client_name.trim())
        .bind(&req.email)
        .bind(&req.phone)
        .bind(&req.address)
        .bind(&req.notes)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Client", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| StoreError::not_found("Client", id))
    }

    /// Deletes a client. Sales recorded against the client survive as
    /// walk-ins (client_id set NULL by the schema).
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        debug!(client_id = id, "deleting client");

        let result = sqlx::query("DELETE FROM clients WHERE client_id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Client", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{DbConfig, Store};

    async fn test_store() -> Store {
        Store::open(DbConfig::in_memory()).await.unwrap()
    }

    fn acme() -> NewClientRequest {
        NewClientRequest {
            client_name: "Acme Ltd".to_string(),
            email: Some("orders@acme.test".to_string()),
            phone: None,
            address: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn crud_roundtrip() {
        let store = test_store().await;
        let repo = store.clients();

        let created = repo.create(&acme()).await.unwrap();
        assert_eq!(created.client_name, "Acme Ltd");

        let mut update = acme();
        update.phone = Some("555-0100".to_string());
        let updated = repo.update(created.client_id, &update).await.unwrap();
        assert_eq!(updated.phone.as_deref(), Some("555-0100"));

        repo.delete(created.client_id).await.unwrap();
        assert!(repo.get_by_id(created.client_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn name_is_required() {
        let store = test_store().await;

        let mut req = acme();
        req.client_name = String::new();
        assert!(matches!(
            store.clients().create(&req).await,
            Err(StoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn list_is_ordered_by_name() {
        let store = test_store().await;
        let repo = store.clients();

        let mut b = acme();
        b.client_name = "Beta".to_string();
        repo.create(&b).await.unwrap();

        let mut a = acme();
        a.client_name = "Alpha".to_string();
        repo.create(&a).await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.client_name)
            .collect();
        assert_eq!(names, vec!["Alpha".to_string(), "Beta".to_string()]);
    }
}
