//! # Inventory Routes
//!
//! Item CRUD and the low-stock view. Stock levels are read-only here;
//! they move only through `/api/sales` and `/api/supply`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::ApiError;
use crate::state::AppState;
use stockbook_core::{NewItemRequest, UpdateItemRequest};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/low-stock", get(low_stock))
        .route(
            "/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
}

/// GET /api/inventory - all items
async fn list_items(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let items = state.store.items().list().await?;
    Ok(Json(items))
}

/// GET /api/inventory/low-stock - items at/below reorder level
async fn low_stock(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let items = state.store.items().low_stock().await?;
    Ok(Json(items))
}

/// GET /api/inventory/:id - single item
async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state
        .store
        .items()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("InventoryItem", id))?;
    Ok(Json(item))
}

/// POST /api/inventory - create item
async fn create_item(
    State(state): State<AppState>,
    Json(req): Json<NewItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state.store.items().create(&req).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/inventory/:id - update item (never its quantity)
async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state.store.items().update(id, &req).await?;
    Ok(Json(item))
}

/// DELETE /api/inventory/:id - delete item (409 while referenced)
async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.store.items().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
