/// Per-session run listing: one record per (subject, session) pair.
use crate::layout::{DatasetQuery, QueryFilter, RunId};

/// Runs of one scan type found in one subject's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRuns {
    /// Subject label.
    pub subject: String,
    /// Session label.
    pub session: String,
    /// Matching run ids; empty when no file matched.
    pub runs: Vec<RunId>,
}

/// Walk subjects then their sessions, querying runs that match `scan`.
///
/// Subjects without sessions produce no record. `scan` is narrowed to each
/// subject/session pair before querying.
#[must_use]
pub fn collect_session_runs<Q: DatasetQuery + ?Sized>(
    dataset: &Q,
    scan: &QueryFilter,
) -> Vec<SessionRuns> {
    let mut records = Vec::new();
    for subject in dataset.subjects() {
        for session in dataset.sessions(Some(&subject)) {
            let filter = scan.clone().within(&subject, &session);
            let runs = dataset.runs(&filter);
            records.push(SessionRuns {
                subject: subject.clone(),
                session,
                runs,
            });
        }
    }
    records
}
