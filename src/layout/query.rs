/// Read-only queries over an indexed dataset.
///
/// Commands talk to a dataset only through [`DatasetQuery`], so the report
/// builders can run against an in-memory stub in tests.
use std::collections::BTreeSet;

use super::entities::{RUN, RunId, SESSION, SUBJECT};
use super::index::{BidsFile, BidsLayout};

/// Typed replacement for a keyword-argument file query.
///
/// Every `Some` field must match the file exactly; `None` fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    /// `sub` entity.
    pub subject: Option<String>,
    /// `ses` entity.
    pub session: Option<String>,
    /// `run` entity, compared after numeric normalization.
    pub run: Option<RunId>,
    /// BIDS suffix, e.g. `T2w`.
    pub suffix: Option<String>,
    /// `part` entity, e.g. `mag` or `phase`.
    pub part: Option<String>,
    /// `acq` entity.
    pub acquisition: Option<String>,
    /// `task` entity.
    pub task: Option<String>,
    /// Extension, with or without a leading dot.
    pub extension: Option<String>,
}

impl QueryFilter {
    /// Narrow this filter to one subject/session pair.
    #[must_use]
    pub fn within(mut self, subject: &str, session: &str) -> Self {
        self.subject = Some(subject.to_owned());
        self.session = Some(session.to_owned());
        self
    }

    /// Narrow this filter to one run.
    #[must_use]
    pub fn with_run(mut self, run: RunId) -> Self {
        self.run = Some(run);
        self
    }

    /// Whether `file` satisfies every constraint set on this filter.
    #[must_use]
    pub fn matches(&self, file: &BidsFile) -> bool {
        let entities = [
            (SUBJECT, &self.subject),
            (SESSION, &self.session),
            ("part", &self.part),
            ("acq", &self.acquisition),
            ("task", &self.task),
        ];
        let entities_ok = entities
            .iter()
            .all(|(key, want)| want.as_deref().is_none_or(|w| file.entity(key) == Some(w)));

        entities_ok
            && self
                .run
                .as_ref()
                .is_none_or(|want| file.entity(RUN).map(RunId::parse).as_ref() == Some(want))
            && self.suffix.as_deref().is_none_or(|s| file.suffix == s)
            && self
                .extension
                .as_deref()
                .is_none_or(|e| file.extension == e.trim_start_matches('.'))
    }
}

/// The narrow query surface commands need from a dataset.
///
/// All lists are de-duplicated and sorted.
pub trait DatasetQuery {
    /// All subject labels.
    fn subjects(&self) -> Vec<String>;

    /// Session labels, for one subject or (with `None`) the whole dataset.
    fn sessions(&self, subject: Option<&str>) -> Vec<String>;

    /// Run identifiers of files matching `filter` that carry a `run` entity.
    fn runs(&self, filter: &QueryFilter) -> Vec<RunId>;

    /// Relative paths of files matching `filter`.
    fn matching_files(&self, filter: &QueryFilter) -> Vec<String>;
}

impl BidsLayout {
    /// Distinct values of entity `key` over files matching `filter`.
    ///
    /// Files without the entity are skipped.
    #[must_use]
    pub fn entity_values(&self, key: &str, filter: &QueryFilter) -> Vec<String> {
        self.indexed_files()
            .iter()
            .filter(|f| filter.matches(f))
            .filter_map(|f| f.entity(key))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }
}

impl DatasetQuery for BidsLayout {
    fn subjects(&self) -> Vec<String> {
        self.entity_values(SUBJECT, &QueryFilter::default())
    }

    fn sessions(&self, subject: Option<&str>) -> Vec<String> {
        let filter = QueryFilter {
            subject: subject.map(str::to_owned),
            ..QueryFilter::default()
        };
        self.entity_values(SESSION, &filter)
    }

    fn runs(&self, filter: &QueryFilter) -> Vec<RunId> {
        self.entity_values(RUN, filter)
            .iter()
            .map(|v| RunId::parse(v))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn matching_files(&self, filter: &QueryFilter) -> Vec<String> {
        self.indexed_files()
            .iter()
            .filter(|f| filter.matches(f))
            .map(|f| f.path.clone())
            .collect()
    }
}
