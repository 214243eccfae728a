/// `summary` command: dataset-wide subject and session lists.
use super::open_dataset;
use crate::cli::OutputCtx;
use crate::cli::args::SummaryArgs;
use crate::cli::output::write_summary;
use crate::layout::{DatasetQuery, LayoutConfig};
use crate::report::QueryError;
use crate::types::SummaryOutput;

/// Run `bidsq summary`.
///
/// Sessions are listed across all subjects, not paired with them.
///
/// # Errors
///
/// Returns `QueryError::Usage` without a dataset path; `QueryError::Layout`
/// if the dataset cannot be opened.
pub fn run(args: &SummaryArgs, config: &LayoutConfig, ctx: &OutputCtx) -> Result<(), QueryError> {
    let layout = open_dataset(args.dataset.as_deref(), config, ctx)?;

    let _t_query = ctx.timer("summarize");
    let summary = summarize(&layout);
    drop(_t_query);

    write_summary(&summary, ctx);
    Ok(())
}

fn summarize<Q: DatasetQuery + ?Sized>(dataset: &Q) -> SummaryOutput {
    SummaryOutput {
        subjects: dataset.subjects(),
        sessions: dataset.sessions(None),
    }
}
