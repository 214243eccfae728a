/// BIDS file-name parsing.
///
/// A BIDS name looks like `sub-01_ses-pre_run-2_part-mag_T2w.nii.gz`:
/// `key-value` entities joined by `_`, then a suffix, then an extension
/// that starts at the first `.` (so `nii.gz` stays whole).
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Entity key for the subject label.
pub const SUBJECT: &str = "sub";
/// Entity key for the session label.
pub const SESSION: &str = "ses";
/// Entity key for the run index.
pub const RUN: &str = "run";

/// The pieces of a parsed BIDS file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Entity key -> label, e.g. `sub -> 01`.
    pub entities: BTreeMap<String, String>,
    /// Trailing datatype-specific suffix, e.g. `T2w`, `bold`, `scans`.
    pub suffix: String,
    /// Extension without the leading dot, e.g. `nii.gz`. Empty if none.
    pub extension: String,
}

/// Parse a bare file name (no directories) into entities, suffix and extension.
///
/// Returns `None` for hidden files and names that do not follow the
/// `key-value_..._suffix.ext` pattern (e.g. `dataset_description.json`).
#[must_use]
pub fn parse_filename(name: &str) -> Option<ParsedName> {
    if name.starts_with('.') {
        return None;
    }

    let (stem, extension) = name.split_once('.').unwrap_or((name, ""));
    let mut segments: Vec<&str> = stem.split('_').collect();
    let suffix = segments.pop()?;
    if !is_label(suffix) {
        return None;
    }

    let mut entities = BTreeMap::new();
    for segment in segments {
        let (key, value) = segment.split_once('-')?;
        if !is_key(key) || !is_label(value) {
            return None;
        }
        entities.insert(key.to_owned(), value.to_owned());
    }

    Some(ParsedName {
        entities,
        suffix: suffix.to_owned(),
        extension: extension.to_owned(),
    })
}

fn is_key(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}

fn is_label(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// A run identifier.
///
/// Numeric labels become integers (`run-02` -> `2`) and serialize as JSON
/// numbers; anything else is kept as a string. Integers sort before labels.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunId {
    /// All-digit run label.
    Index(u64),
    /// Non-numeric run label.
    Label(String),
}

impl RunId {
    /// Interpret a raw `run` entity value.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        value
            .parse::<u64>()
            .map_or_else(|_| Self::Label(value.to_owned()), Self::Index)
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(n) => write!(f, "{n}"),
            Self::Label(s) => f.write_str(s),
        }
    }
}
