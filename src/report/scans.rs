/// Per-run scan listing: one record per (subject, session, run).
use std::collections::BTreeSet;

use crate::layout::{DatasetQuery, QueryFilter, RunId};

/// Files of one scan type belonging to a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRun {
    /// Subject label.
    pub subject: String,
    /// Session label.
    pub session: String,
    /// Run id, or `None` for files without a `run` entity.
    pub run: Option<RunId>,
    /// Relative paths of the matching files.
    pub files: Vec<String>,
}

/// Expand every subject/session pair into its runs and their files.
///
/// Matching files without a `run` entity are gathered into a leading
/// `run: None` record. A session with no matching file at all still yields
/// that record, with no files, so every session is accounted for.
#[must_use]
pub fn collect_scan_runs<Q: DatasetQuery + ?Sized>(dataset: &Q, scan: &QueryFilter) -> Vec<ScanRun> {
    let mut records = Vec::new();
    for subject in dataset.subjects() {
        for session in dataset.sessions(Some(&subject)) {
            let scoped = scan.clone().within(&subject, &session);
            let runs = dataset.runs(&scoped);
            let all_files = dataset.matching_files(&scoped);

            let mut per_run = Vec::with_capacity(runs.len());
            let mut claimed = BTreeSet::new();
            for run in runs {
                let files = dataset.matching_files(&scoped.clone().with_run(run.clone()));
                claimed.extend(files.iter().cloned());
                per_run.push(ScanRun {
                    subject: subject.clone(),
                    session: session.clone(),
                    run: Some(run),
                    files,
                });
            }

            let unnumbered: Vec<String> =
                all_files.into_iter().filter(|f| !claimed.contains(f)).collect();
            if per_run.is_empty() || !unnumbered.is_empty() {
                records.push(ScanRun {
                    subject: subject.clone(),
                    session: session.clone(),
                    run: None,
                    files: unnumbered,
                });
            }
            records.extend(per_run);
        }
    }
    records
}
