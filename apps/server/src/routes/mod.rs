//! # API Routes
//!
//! One router per resource, assembled here under `/api`, mirroring the
//! dashboard's endpoints:
//!
//! ```text
//! /api/inventory   items CRUD + low-stock view
//! /api/clients     client CRUD
//! /api/vendors     vendor CRUD
//! /api/sales       record / list / fetch / delete sales
//! /api/supply      record / list / fetch / delete supply orders
//! /api/reports     inventory, transaction and dashboard summaries
//! /api/export      point-in-time snapshot for external rendering
//! /api/health      liveness + database connectivity
//! ```

pub mod clients;
pub mod export;
pub mod inventory;
pub mod reports;
pub mod sales;
pub mod supply;
pub mod vendors;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{extract::State, Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router with CORS and request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api/inventory", inventory::router())
        .nest("/api/clients", clients::router())
        .nest("/api/vendors", vendors::router())
        .nest("/api/sales", sales::router())
        .nest("/api/supply", supply::router())
        .nest("/api/reports", reports::router())
        .nest("/api/export", export::router())
        .route("/api/health", get(health))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        // single-operator tool behind the dashboard; wide open on purpose
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    database: &'static str,
}

/// Liveness endpoint: reports whether the store answers queries.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let healthy = state.store.health_check().await;

    let body = HealthResponse {
        status: if healthy { "ok" } else { "error" },
        timestamp: chrono::Utc::now().to_rfc3339(),
        database: if healthy { "connected" } else { "error" },
    };

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(body))
}

#[derive(Debug, Serialize)]
struct NotFoundBody {
    error: &'static str,
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundBody {
            error: "endpoint not found",
        }),
    )
}
