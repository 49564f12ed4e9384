// In crates/strategies/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Price series is empty")]
    EmptySeries,

    #[error("Not enough history: {required} bars required, {available} available")]
    InsufficientHistory { required: usize, available: usize },

    #[error("Latest close is not a usable price: {0}")]
    InvalidPrice(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
