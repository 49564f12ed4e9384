// In crates/execution/src/error.rs

use core_types::Symbol;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Insufficient funds: order costs {required}, only {available} available")]
    InsufficientFunds { required: Decimal, available: Decimal },

    #[error("No open position found for symbol {0}")]
    NoPosition(Symbol),

    #[error("A position is already open for symbol {0}")]
    PositionAlreadyOpen(Symbol),

    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("Invalid simulation settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, Error>;
