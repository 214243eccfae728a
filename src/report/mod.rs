/// Report layer: shape dataset queries into per-session and per-run records.
pub mod errors;
pub mod scans;
pub mod session_runs;

#[cfg(test)]
pub(crate) mod stub;

pub use errors::QueryError;
pub use scans::{ScanRun, collect_scan_runs};
pub use session_runs::{SessionRuns, collect_session_runs};
