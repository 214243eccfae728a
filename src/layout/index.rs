/// Dataset indexing: walk a BIDS tree once and keep every parsed file in memory.
///
/// Indexing rules:
///
/// 1. Hidden entries (leading `.`) are skipped at every depth.
/// 2. Top-level directories named in [`LayoutConfig::ignore`] are skipped
///    (`derivatives`, `sourcedata`, ... by default).
/// 3. Only regular files whose names parse as BIDS names are kept.
/// 4. A file name without `sub-`/`ses-` inherits them from `sub-*`/`ses-*`
///    parent directories.
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use walkdir::{DirEntry, WalkDir};

use super::entities::{SESSION, SUBJECT, parse_filename};
use super::errors::LayoutError;

/// File that marks the root of a BIDS dataset.
pub const DESCRIPTION_FILE: &str = "dataset_description.json";

/// Top-level directories that never hold raw subject data.
pub const DEFAULT_IGNORED: &[&str] = &["code", "derivatives", "models", "sourcedata", "stimuli"];

/// Options controlling how a dataset is opened.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Require a readable `dataset_description.json` at the root.
    pub validate: bool,
    /// Top-level directory names to skip while walking.
    pub ignore: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            validate: true,
            ignore: DEFAULT_IGNORED.iter().map(|&s| s.to_owned()).collect(),
        }
    }
}

/// The fields of `dataset_description.json` this tool reads.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetDescription {
    /// Dataset name (required by BIDS).
    #[serde(rename = "Name")]
    pub name: String,
    /// BIDS version the dataset claims to follow.
    #[serde(rename = "BIDSVersion", default)]
    pub bids_version: Option<String>,
}

/// One indexed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidsFile {
    /// Path relative to the dataset root, `/`-separated.
    pub path: String,
    /// Entity key -> label.
    pub entities: BTreeMap<String, String>,
    /// BIDS suffix, e.g. `T2w`.
    pub suffix: String,
    /// Extension without the leading dot, e.g. `nii.gz`.
    pub extension: String,
}

impl BidsFile {
    /// Look up an entity label by key (`sub`, `ses`, `run`, ...).
    #[must_use]
    pub fn entity(&self, key: &str) -> Option<&str> {
        self.entities.get(key).map(String::as_str)
    }
}

/// A read-only, in-memory index over one dataset.
#[derive(Debug)]
pub struct BidsLayout {
    root: PathBuf,
    description: Option<DatasetDescription>,
    files: Vec<BidsFile>,
}

impl BidsLayout {
    /// Open and index the dataset rooted at `root`.
    ///
    /// # Errors
    ///
    /// - `LayoutError::DatasetNotFound` / `NotADirectory` for a bad root
    /// - `LayoutError::MissingDescription` / `InvalidDescription` when
    ///   `config.validate` is set and the description is absent or malformed
    /// - `LayoutError::Walk` / `Io` on filesystem failures
    pub fn open(root: &Path, config: &LayoutConfig) -> Result<Self, LayoutError> {
        let meta = std::fs::metadata(root).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LayoutError::DatasetNotFound {
                    path: root.display().to_string(),
                }
            } else {
                LayoutError::Io {
                    path: root.display().to_string(),
                    source,
                }
            }
        })?;
        if !meta.is_dir() {
            return Err(LayoutError::NotADirectory {
                path: root.display().to_string(),
            });
        }

        let description = if config.validate {
            Some(read_description(root)?)
        } else {
            None
        };

        let files = index_files(root, config)?;

        Ok(Self {
            root: root.to_path_buf(),
            description,
            files,
        })
    }

    /// The dataset root as given to [`BidsLayout::open`].
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Parsed `dataset_description.json`, if validation was on.
    #[must_use]
    pub fn description(&self) -> Option<&DatasetDescription> {
        self.description.as_ref()
    }

    /// Every indexed file, in walk order (sorted by name within a directory).
    #[must_use]
    pub fn indexed_files(&self) -> &[BidsFile] {
        &self.files
    }
}

fn read_description(root: &Path) -> Result<DatasetDescription, LayoutError> {
    let path = root.join(DESCRIPTION_FILE);
    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(LayoutError::MissingDescription {
                root: root.display().to_string(),
            });
        }
        Err(source) => {
            return Err(LayoutError::Io {
                path: path.display().to_string(),
                source,
            });
        }
    };

    serde_json::from_str(&text).map_err(|e| LayoutError::InvalidDescription {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn index_files(root: &Path, config: &LayoutConfig) -> Result<Vec<BidsFile>, LayoutError> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry, config));

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        if let Some(file) = index_entry(relative) {
            files.push(file);
        }
    }
    Ok(files)
}

fn is_excluded(entry: &DirEntry, config: &LayoutConfig) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') {
        return true;
    }
    entry.depth() == 1
        && entry.file_type().is_dir()
        && config.ignore.iter().any(|ignored| ignored == name.as_ref())
}

fn index_entry(relative: &Path) -> Option<BidsFile> {
    let name = relative.file_name()?.to_str()?;
    let parsed = parse_filename(name)?;

    let dirs: Vec<&str> = relative
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();

    let mut entities = parsed.entities;
    for dir in &dirs {
        if let Some((key @ (SUBJECT | SESSION), label)) = dir.split_once('-') {
            entities
                .entry(key.to_owned())
                .or_insert_with(|| label.to_owned());
        }
    }

    let mut path = dirs.join("/");
    if !path.is_empty() {
        path.push('/');
    }
    path.push_str(name);

    Some(BidsFile {
        path,
        entities,
        suffix: parsed.suffix,
        extension: parsed.extension,
    })
}
