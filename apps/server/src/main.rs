//! # Stockbook Server
//!
//! REST API entry point.
//!
//! ## Startup Sequence
//! ```text
//! 1. Initialize logging (tracing-subscriber, RUST_LOG overridable)
//! 2. Read configuration from the environment
//! 3. Open the store (creates the database file, runs migrations)
//! 4. Serve the API with CORS + request tracing
//! 5. On SIGINT/SIGTERM: finish in-flight requests, close the pool
//! ```

mod config;
mod error;
mod routes;
mod state;

use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::ServerConfig;
use state::AppState;
use stockbook_db::{DbConfig, Store};

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ServerConfig::from_env();
    info!(
        port = config.port,
        db = %config.database_path.display(),
        "starting stockbook server"
    );

    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).expect("failed to create data directory");
        }
    }

    let store = Store::open(DbConfig::new(&config.database_path))
        .await
        .expect("failed to open store");
    info!("store opened, migrations applied");

    let app = routes::app(AppState::new(store.clone()));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");

    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    info!("shutting down");
    store.close().await;
}

/// Initializes the tracing subscriber for structured logging.
///
/// Default: INFO for everything, DEBUG for the stockbook crates; set
/// `RUST_LOG` to override.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stockbook=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Resolves when the process receives Ctrl-C or (on unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
