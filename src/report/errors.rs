/// Errors surfaced by commands.
use thiserror::Error;

use crate::layout::LayoutError;

/// Errors that can occur while answering a dataset query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// No dataset path was supplied on the command line.
    #[error("no path was given or path is invalid")]
    Usage,

    /// The dataset could not be opened or indexed.
    #[error("{0}")]
    Layout(#[from] LayoutError),

    /// Writing the output file failed.
    #[error("Failed to write '{path}': {source}")]
    Write {
        /// Destination file.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A record could not be serialized.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Exit code mapping for `QueryError` variants.
impl QueryError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage
            | Self::Write { .. }
            | Self::Json(_)
            | Self::Layout(LayoutError::Walk(_) | LayoutError::Io { .. }) => 1,
            Self::Layout(_) => 2,
        }
    }

    /// Machine-readable error code (snake_case) for the JSON error envelope.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usage => "usage_error",
            Self::Layout(layout) => match layout {
                LayoutError::DatasetNotFound { .. } => "dataset_not_found",
                LayoutError::NotADirectory { .. } => "not_a_directory",
                LayoutError::MissingDescription { .. } => "missing_description",
                LayoutError::InvalidDescription { .. } => "invalid_description",
                LayoutError::Walk(_) => "walk_error",
                LayoutError::Io { .. } => "io_error",
            },
            Self::Write { .. } => "write_error",
            Self::Json(_) => "json_error",
        }
    }
}
