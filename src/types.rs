/// Shared serializable output types for all commands.
///
/// These types are what gets written to stdout or the output file. They are
/// decoupled from the report-layer `SessionRuns` / `ScanRun` types.
use serde::{Deserialize, Serialize};

use crate::layout::RunId;
use crate::report::{QueryError, ScanRun, SessionRuns};

/// Runs of one scan type within one subject's session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRunsOutput {
    /// Subject label (e.g., "01").
    pub subject: String,
    /// Session label (e.g., "pre").
    pub session: String,
    /// Matching run ids, or `[null]` when no file matched.
    pub runs: Vec<Option<RunId>>,
}

impl From<SessionRuns> for SessionRunsOutput {
    fn from(record: SessionRuns) -> Self {
        let runs = if record.runs.is_empty() {
            vec![None]
        } else {
            record.runs.into_iter().map(Some).collect()
        };
        Self {
            subject: record.subject,
            session: record.session,
            runs,
        }
    }
}

/// Dataset-wide subject and session lists (not paired).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryOutput {
    /// Every subject label.
    pub subjects: Vec<String>,
    /// Every session label across all subjects.
    pub sessions: Vec<String>,
}

/// One run of one scan type, with its files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOutput {
    /// Subject label.
    pub subject: String,
    /// Session label.
    pub session: String,
    /// Run id, or null for a session without matching runs.
    pub run: Option<RunId>,
    /// Matching files, relative to the dataset root.
    pub files: Vec<String>,
}

impl From<ScanRun> for ScanOutput {
    fn from(record: ScanRun) -> Self {
        Self {
            subject: record.subject,
            session: record.session,
            run: record.run,
            files: record.files,
        }
    }
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorOutput {
    /// Construct from a `QueryError`.
    #[must_use]
    pub fn from_query_error(err: &QueryError) -> Self {
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
            },
        }
    }
}
