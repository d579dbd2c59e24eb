//! # Server Configuration
//!
//! Settings read from the environment at startup.

use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_PATH: &str = "./data/stockbook.db";

/// Runtime configuration for the server process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port to listen on. `STOCKBOOK_PORT` (or `PORT`), default 3000.
    pub port: u16,

    /// SQLite database file. `STOCKBOOK_DB_PATH`, default
    /// `./data/stockbook.db`; the parent directory is created at
    /// startup.
    pub database_path: PathBuf,
}

impl ServerConfig {
    /// Reads the configuration from environment variables, falling back
    /// to defaults.
    pub fn from_env() -> Self {
        let port = std::env::var("STOCKBOOK_PORT")
            .or_else(|_| std::env::var("PORT"))
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let database_path = std::env::var("STOCKBOOK_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH));

        ServerConfig {
            port,
            database_path,
        }
    }
}
