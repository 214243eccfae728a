/// In-memory `DatasetQuery` used by report and command tests.
use std::cell::RefCell;

use crate::layout::{DatasetQuery, QueryFilter, RunId};

/// A fixed dataset: subjects with their sessions, and run ids per session.
#[derive(Debug, Default)]
pub struct StubDataset {
    /// `(subject, sessions)` in the order `subjects()` returns them.
    pub sessions: Vec<(&'static str, Vec<&'static str>)>,
    /// `(subject, session, runs)` returned for any filter scoped to that pair.
    pub runs: Vec<(&'static str, &'static str, Vec<RunId>)>,
    /// `(subject, session, path)` of matching files without a `run` entity.
    pub unnumbered: Vec<(&'static str, &'static str, &'static str)>,
    /// Every filter passed to `runs` or `matching_files`, in call order.
    pub seen: RefCell<Vec<QueryFilter>>,
}

impl StubDataset {
    #[must_use]
    pub fn new(sessions: Vec<(&'static str, Vec<&'static str>)>) -> Self {
        Self {
            sessions,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_runs(mut self, subject: &'static str, session: &'static str, runs: Vec<RunId>) -> Self {
        self.runs.push((subject, session, runs));
        self
    }

    #[must_use]
    pub fn with_unnumbered_file(
        mut self,
        subject: &'static str,
        session: &'static str,
        path: &'static str,
    ) -> Self {
        self.unnumbered.push((subject, session, path));
        self
    }

    fn runs_for(&self, filter: &QueryFilter) -> Vec<RunId> {
        self.runs
            .iter()
            .find(|(sub, ses, _)| {
                filter.subject.as_deref() == Some(*sub) && filter.session.as_deref() == Some(*ses)
            })
            .map(|(_, _, runs)| runs.clone())
            .unwrap_or_default()
    }
}

impl DatasetQuery for StubDataset {
    fn subjects(&self) -> Vec<String> {
        self.sessions.iter().map(|(s, _)| (*s).to_owned()).collect()
    }

    fn sessions(&self, subject: Option<&str>) -> Vec<String> {
        let mut out: Vec<String> = self
            .sessions
            .iter()
            .filter(|(s, _)| subject.is_none_or(|want| want == *s))
            .flat_map(|(_, sessions)| sessions.iter().map(|&s| s.to_owned()))
            .collect();
        out.sort();
        out.dedup();
        out
    }

    fn runs(&self, filter: &QueryFilter) -> Vec<RunId> {
        self.seen.borrow_mut().push(filter.clone());
        self.runs_for(filter)
    }

    fn matching_files(&self, filter: &QueryFilter) -> Vec<String> {
        self.seen.borrow_mut().push(filter.clone());
        let (Some(sub), Some(ses)) = (&filter.subject, &filter.session) else {
            return Vec::new();
        };
        let mut files: Vec<String> = self
            .runs_for(filter)
            .iter()
            .filter(|r| filter.run.as_ref().is_none_or(|want| want == *r))
            .map(|r| format!("sub-{sub}/ses-{ses}/anat/sub-{sub}_ses-{ses}_run-{r}_T2w.nii.gz"))
            .collect();
        if filter.run.is_none() {
            files.extend(
                self.unnumbered
                    .iter()
                    .filter(|(s, e, _)| sub.as_str() == *s && ses.as_str() == *e)
                    .map(|(_, _, path)| (*path).to_owned()),
            );
        }
        files
    }
}
