/// `scans` command: one record per subject/session/run with its files.
use super::open_dataset;
use crate::cli::OutputCtx;
use crate::cli::args::ScansArgs;
use crate::cli::output::write_scans;
use crate::layout::LayoutConfig;
use crate::report::{QueryError, collect_scan_runs};
use crate::types::ScanOutput;

/// Run `bidsq scans`.
///
/// # Errors
///
/// Returns `QueryError::Usage` without a dataset path; `QueryError::Layout`
/// if the dataset cannot be opened.
pub fn run(args: &ScansArgs, config: &LayoutConfig, ctx: &OutputCtx) -> Result<(), QueryError> {
    let layout = open_dataset(args.dataset.as_deref(), config, ctx)?;
    let scan = args.scan.to_filter();

    let _t_collect = ctx.timer("collect_scan_runs");
    let records: Vec<ScanOutput> = collect_scan_runs(&layout, &scan)
        .into_iter()
        .map(ScanOutput::from)
        .collect();
    drop(_t_collect);

    write_scans(&records, ctx);
    Ok(())
}
