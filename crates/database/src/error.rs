// In crates/database/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Persistence is not configured: {0}")]
    NotConfigured(String),
    #[error("Failed to connect to the database")]
    ConnectionError(#[from] sqlx::Error),
    #[error("Database migration failed: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
    #[error("Database operation failed")]
    OperationFailed(sqlx::Error),
    #[error("Ledger document is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Ledger file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the store was never usable, as opposed to failing at runtime.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Error::NotConfigured(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
