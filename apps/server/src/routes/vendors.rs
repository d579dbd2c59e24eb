//! # Vendor Routes

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::ApiError;
use crate::state::AppState;
use stockbook_core::NewVendorRequest;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vendors).post(create_vendor))
        .route(
            "/:id",
            get(get_vendor).put(update_vendor).delete(delete_vendor),
        )
}

/// GET /api/vendors - all vendors
async fn list_vendors(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let vendors = state.store.vendors().list().await?;
    Ok(Json(vendors))
}

/// GET /api/vendors/:id - single vendor
async fn get_vendor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let vendor = state
        .store
        .vendors()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Vendor", id))?;
    Ok(Json(vendor))
}

/// POST /api/vendors - create vendor
async fn create_vendor(
    State(state): State<AppState>,
    Json(req): Json<NewVendorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let vendor = state.store.vendors().create(&req).await?;
    Ok((StatusCode::CREATED, Json(vendor)))
}

/// PUT /api/vendors/:id - update vendor
async fn update_vendor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<NewVendorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let vendor = state.store.vendors().update(id, &req).await?;
    Ok(Json(vendor))
}

/// DELETE /api/vendors/:id - delete vendor; their orders become unassigned
async fn delete_vendor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.store.vendors().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
