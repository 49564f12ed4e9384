// In crates/engine/src/error.rs

use thiserror::Error;

/// Why the engine could not be assembled from its settings.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid risk settings: {0}")]
    Risk(#[from] risk::Error),
    #[error("Invalid execution settings: {0}")]
    Execution(#[from] execution::Error),
    #[error("Invalid portfolio settings: {0}")]
    Portfolio(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A cycle that did not complete. Per-instrument problems never end up here;
/// they are recorded in the cycle report instead.
#[derive(Error, Debug)]
pub enum CycleError {
    #[error("Persistence is not configured: {0}")]
    ConfigurationMissing(String),
    #[error("Ledger store unavailable: {0}")]
    Persistence(#[source] database::Error),
}

impl From<database::Error> for CycleError {
    fn from(err: database::Error) -> Self {
        match err {
            database::Error::NotConfigured(reason) => CycleError::ConfigurationMissing(reason),
            other => CycleError::Persistence(other),
        }
    }
}
