//! # Sales Routes
//!
//! Recording goes through the ledger engine; a failed sale leaves no
//! trace (no header, no lines, no stock change). Deleting a sale
//! removes it from history without restocking.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::ApiError;
use crate::state::AppState;
use stockbook_core::NewSaleRequest;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sales).post(record_sale))
        .route("/details", get(sale_details))
        .route("/:id", get(get_sale).delete(delete_sale))
}

/// GET /api/sales - summary rows, most recent first
async fn list_sales(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let sales = state.store.ledger().list_sales().await?;
    Ok(Json(sales))
}

/// GET /api/sales/details - every line item joined for display
async fn sale_details(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let details = state.store.ledger().sale_details().await?;
    Ok(Json(details))
}

/// GET /api/sales/:id - hydrated sale
async fn get_sale(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let sale = state
        .store
        .ledger()
        .get_sale(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Sale", id))?;
    Ok(Json(sale))
}

/// POST /api/sales - record a sale
///
/// Body: `{ client_id?, notes?, items: [{item_id, quantity,
/// unit_price_cents, notes?}] }`. 400 on an empty batch or insufficient
/// stock; either way nothing is applied.
async fn record_sale(
    State(state): State<AppState>,
    Json(req): Json<NewSaleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let sale = state.store.ledger().record_sale(&req).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

/// DELETE /api/sales/:id - delete sale (line items cascade, stock kept)
async fn delete_sale(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.store.ledger().delete_sale(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
