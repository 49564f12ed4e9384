// In crates/execution/src/lib.rs

use chrono::{DateTime, Utc};
use core_types::{LedgerState, OrderRequest};

pub mod error;
pub mod simulated;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use simulated::SimulatedExecutor;
pub use types::{Execution, SimulationSettings};

/// The universal interface for an execution handler.
///
/// An `Executor` applies a sized `OrderRequest` to the ledger as one atomic
/// transition: either cash, position and audit log all change, or nothing
/// does and an `Error` explains why.
pub trait Executor {
    /// The name of the executor.
    fn name(&self) -> &'static str;

    fn execute(
        &self,
        order: &OrderRequest,
        timestamp: DateTime<Utc>,
        ledger: &mut LedgerState,
    ) -> Result<Execution>;
}
