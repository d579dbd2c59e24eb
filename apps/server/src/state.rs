//! # Application State
//!
//! Shared state handed to every route handler. The `Store` is the only
//! shared resource; it is opened once in `main` and cloned cheaply
//! (clones share the underlying pool).

use stockbook_db::Store;

/// State injected into all handlers via `axum::extract::State`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Store,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        AppState { store }
    }
}
