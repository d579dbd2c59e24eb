//! # Client Routes

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::ApiError;
use crate::state::AppState;
use stockbook_core::NewClientRequest;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route(
            "/:id",
            get(get_client).put(update_client).delete(delete_client),
        )
}

/// GET /api/clients - all clients
async fn list_clients(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let clients = state.store.clients().list().await?;
    Ok(Json(clients))
}

/// GET /api/clients/:id - single client
async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let client = state
        .store
        .clients()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Client", id))?;
    Ok(Json(client))
}

/// POST /api/clients - create client
async fn create_client(
    State(state): State<AppState>,
    Json(req): Json<NewClientRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let client = state.store.clients().create(&req).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// PUT /api/clients/:id - update client
async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<NewClientRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let client = state.store.clients().update(id, &req).await?;
    Ok(Json(client))
}

/// DELETE /api/clients/:id - delete client; their sales become walk-ins
async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.store.clients().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
