/// Command dispatch: routes `Command` enum variants to their implementations.
pub mod runs;
pub mod scans;
pub mod summary;

use std::path::Path;

use crate::cli::OutputCtx;
use crate::cli::args::{Cli, Command};
use crate::layout::{BidsLayout, LayoutConfig};
use crate::report::QueryError;

/// Dispatch a parsed command line to its handler.
///
/// A bare dataset path with no subcommand runs `runs`.
///
/// # Errors
///
/// Returns `QueryError` on any command failure.
pub fn dispatch(cli: &Cli, ctx: &OutputCtx) -> Result<(), QueryError> {
    let config = cli.layout.to_config();
    match &cli.command {
        Some(Command::Runs(args)) => runs::run(args, &config, ctx),
        Some(Command::Summary(args)) => summary::run(args, &config, ctx),
        Some(Command::Scans(args)) => scans::run(args, &config, ctx),
        None => runs::run(&cli.runs, &config, ctx),
    }
}

/// Check the dataset path argument and index the dataset.
///
/// # Errors
///
/// Returns `QueryError::Usage` when no path was given, `QueryError::Layout`
/// when the dataset cannot be opened.
fn open_dataset(
    path: Option<&Path>,
    config: &LayoutConfig,
    ctx: &OutputCtx,
) -> Result<BidsLayout, QueryError> {
    let root = path.ok_or(QueryError::Usage)?;

    let _t_index = ctx.timer("index_dataset");
    let layout = BidsLayout::open(root, config)?;
    drop(_t_index);

    if let Some(desc) = layout.description() {
        ctx.debug_note(&format!(
            "dataset '{}' (BIDS {})",
            desc.name,
            desc.bids_version.as_deref().unwrap_or("unknown")
        ));
    }
    ctx.debug_note(&format!(
        "indexed {} files under {}",
        layout.indexed_files().len(),
        layout.root().display()
    ));

    Ok(layout)
}
