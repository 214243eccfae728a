/// Errors from opening and indexing a dataset.
use thiserror::Error;

/// Typed errors from the layout layer.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The dataset root does not exist.
    #[error("Dataset root '{path}' does not exist")]
    DatasetNotFound {
        /// The path as given on the command line.
        path: String,
    },

    /// The dataset root exists but is a file.
    #[error("Dataset root '{path}' is not a directory")]
    NotADirectory {
        /// The path as given on the command line.
        path: String,
    },

    /// `dataset_description.json` is absent and validation is on.
    #[error("'dataset_description.json' is missing from dataset root '{root}'")]
    MissingDescription {
        /// The dataset root that was searched.
        root: String,
    },

    /// `dataset_description.json` exists but cannot be parsed.
    #[error("Invalid dataset description '{path}': {reason}")]
    InvalidDescription {
        /// Path of the description file.
        path: String,
        /// Parser message.
        reason: String,
    },

    /// Directory traversal failed (permissions, vanished entries).
    #[error("Failed to walk dataset: {0}")]
    Walk(#[from] walkdir::Error),

    /// Any other I/O failure while reading the dataset.
    #[error("I/O error reading '{path}': {source}")]
    Io {
        /// Path being read.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },
}
