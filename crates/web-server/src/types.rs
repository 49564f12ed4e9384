// In crates/web-server/src/types.rs

use chrono::{DateTime, Utc};
use core_types::LedgerState;
use serde::Serialize;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Body of `/run`.
#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub status: &'static str,
    pub message: String,
    pub timestamp: String,
    pub report: engine::CycleReport,
}

/// Body of `/`: the ledger fields at top level plus the server clock.
#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    #[serde(flatten)]
    pub ledger: LedgerState,
    pub server_time: String,
}
