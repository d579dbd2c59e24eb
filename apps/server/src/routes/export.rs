//! # Export Routes
//!
//! Serves the point-in-time snapshot the external spreadsheet renderer
//! consumes: for every table and view, its name, ordered columns and
//! current rows, all read in one transaction.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/snapshot", get(snapshot))
}

/// GET /api/export/snapshot - consistent multi-table snapshot
async fn snapshot(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let tables = state.store.snapshot().fetch().await?;
    Ok(Json(tables))
}
