//! Application-wide error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Chain id {0} is not in the network configuration table")]
    UnknownChain(u64),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Deploy command failed: {0}")]
    Cli(String),

    #[error("Verification failed: {0}")]
    Verification(String),
}

pub type Result<T> = std::result::Result<T, DeployError>;
