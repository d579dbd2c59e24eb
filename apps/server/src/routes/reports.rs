//! # Report Routes
//!
//! Summaries recomputed from current table state on every request;
//! there is no cache to go stale.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;
use stockbook_core::{InventorySummary, TransactionSummary};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/inventory", get(inventory_summary))
        .route("/transactions", get(transaction_summary))
        .route("/dashboard", get(dashboard))
}

/// GET /api/reports/inventory - valuation + low-stock count
async fn inventory_summary(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let summary = state.store.reports().inventory_summary().await?;
    Ok(Json(summary))
}

/// GET /api/reports/transactions - revenue, cost, margin
async fn transaction_summary(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state.store.reports().transaction_summary().await?;
    Ok(Json(summary))
}

#[derive(Debug, Serialize)]
struct DashboardReport {
    inventory: InventorySummary,
    transactions: TransactionSummary,
}

/// GET /api/reports/dashboard - both summaries in one response
async fn dashboard(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let reports = state.store.reports();

    let report = DashboardReport {
        inventory: reports.inventory_summary().await?,
        transactions: reports.transaction_summary().await?,
    };

    Ok(Json(report))
}
