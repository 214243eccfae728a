/// `runs` command: list runs of one scan type per subject/session.
use super::open_dataset;
use crate::cli::OutputCtx;
use crate::cli::args::RunsArgs;
use crate::cli::output::{write_json_file, write_session_runs};
use crate::layout::LayoutConfig;
use crate::report::{QueryError, collect_session_runs};
use crate::types::SessionRunsOutput;

/// Run `bidsq runs`.
///
/// Writes `sub_ses_run_description.json` (or `--output-file`) in the current
/// directory, replacing it if present, unless `--stdout` is set.
///
/// # Errors
///
/// Returns `QueryError::Usage` without a dataset path; `QueryError` on
/// dataset, serialization or write failure. No file is written on error.
pub fn run(args: &RunsArgs, config: &LayoutConfig, ctx: &OutputCtx) -> Result<(), QueryError> {
    let layout = open_dataset(args.dataset.as_deref(), config, ctx)?;
    let scan = args.scan.to_filter();

    let _t_collect = ctx.timer("collect_session_runs");
    let records: Vec<SessionRunsOutput> = collect_session_runs(&layout, &scan)
        .into_iter()
        .map(SessionRunsOutput::from)
        .collect();
    drop(_t_collect);

    if args.stdout {
        write_session_runs(&records, ctx);
        return Ok(());
    }

    let _t_write = ctx.timer("write_output_file");
    write_json_file(&args.output_file, &records)?;
    drop(_t_write);

    ctx.debug_note(&format!(
        "wrote {} records to {}",
        records.len(),
        args.output_file.display()
    ));
    Ok(())
}
