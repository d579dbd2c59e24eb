//! # Supply Order Routes
//!
//! Structural mirror of the sales routes; recording increments stock.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::ApiError;
use crate::state::AppState;
use stockbook_core::NewSupplyOrderRequest;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_supply_orders).post(record_supply_order))
        .route("/details", get(supply_order_details))
        .route("/:id", get(get_supply_order).delete(delete_supply_order))
}

/// GET /api/supply - summary rows, most recent first
async fn list_supply_orders(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = state.store.ledger().list_supply_orders().await?;
    Ok(Json(orders))
}

/// GET /api/supply/details - every line item joined for display
async fn supply_order_details(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let details = state.store.ledger().supply_order_details().await?;
    Ok(Json(details))
}

/// GET /api/supply/:id - hydrated supply order
async fn get_supply_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state
        .store
        .ledger()
        .get_supply_order(id)
        .await?
        .ok_or_else(|| ApiError::not_found("SupplyOrder", id))?;
    Ok(Json(order))
}

/// POST /api/supply - record a supply order
///
/// Body: `{ vendor_id?, notes?, items: [{item_id, quantity,
/// cost_price_cents, notes?}] }`.
async fn record_supply_order(
    State(state): State<AppState>,
    Json(req): Json<NewSupplyOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state.store.ledger().record_supply_order(&req).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// DELETE /api/supply/:id - delete supply order (stock kept)
async fn delete_supply_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.store.ledger().delete_supply_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
