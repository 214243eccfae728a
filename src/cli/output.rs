/// Output formatting: JSON variants, table, id modes, output file writing.
use std::io::{ErrorKind, Write};
use std::path::Path;

use comfy_table::{Cell, Table, presets::UTF8_BORDERS_ONLY};
use serde::Serialize;

use super::args::OutputFormat;
use super::json::{to_pretty_string, to_spaced_string};
use crate::report::QueryError;
use crate::types::{ScanOutput, SessionRunsOutput, SummaryOutput};

/// Output context passed to all formatters.
pub struct OutputCtx {
    pub format: OutputFormat,
    pub no_header: bool,
    /// When true, print timing spans and dataset notes to stderr.
    pub debug: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(format: OutputFormat, no_header: bool, debug: bool) -> Self {
        Self {
            format,
            no_header,
            debug,
        }
    }

    /// Start a named debug timer. Prints elapsed on drop only when `--debug` is set.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label, self.debug)
    }

    /// Print a one-line note to stderr when `--debug` is set.
    pub fn debug_note(&self, note: &str) {
        if self.debug {
            eprintln!("[debug] {note}");
        }
    }
}

// --- Session runs ---

/// Write session run records to stdout.
pub fn write_session_runs(records: &[SessionRunsOutput], ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Json | OutputFormat::Pretty => print_pretty_json(records),
        OutputFormat::Compact => print_spaced_json(records),
        OutputFormat::Ndjson => print_ndjson(records),
        OutputFormat::Id => {
            for r in records {
                for run in &r.runs {
                    emit(&format!("{}\t{}\t{}", r.subject, r.session, run_cell(run.as_ref())));
                }
            }
        }
        OutputFormat::Table => write_session_runs_table(records, ctx),
    }
}

fn write_session_runs_table(records: &[SessionRunsOutput], ctx: &OutputCtx) {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    if !ctx.no_header {
        table.set_header(["SUBJECT", "SESSION", "RUNS"]);
    }
    for r in records {
        let runs = r
            .runs
            .iter()
            .map(|run| run_cell(run.as_ref()))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row([Cell::new(&r.subject), Cell::new(&r.session), Cell::new(runs)]);
    }
    emit(&table.to_string());
}

// --- Summary ---

/// Write the dataset summary to stdout.
pub fn write_summary(summary: &SummaryOutput, ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Json | OutputFormat::Compact => print_spaced_json(summary),
        OutputFormat::Pretty => print_pretty_json(summary),
        OutputFormat::Ndjson => print_ndjson(&[summary]),
        OutputFormat::Id => {
            for line in summary_id_lines(summary) {
                emit(&line);
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.load_preset(UTF8_BORDERS_ONLY);
            if !ctx.no_header {
                table.set_header(["SUBJECTS", "SESSIONS"]);
            }
            table.add_row([summary.subjects.join(", "), summary.sessions.join(", ")]);
            emit(&table.to_string());
        }
    }
}

/// Bare labels like the other id outputs: subjects on the first line,
/// sessions on the second, tab-separated.
fn summary_id_lines(summary: &SummaryOutput) -> [String; 2] {
    [summary.subjects.join("\t"), summary.sessions.join("\t")]
}

// --- Scans ---

/// Write per-run scan records to stdout.
pub fn write_scans(records: &[ScanOutput], ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Json | OutputFormat::Pretty => print_pretty_json(records),
        OutputFormat::Compact => print_spaced_json(records),
        OutputFormat::Ndjson => print_ndjson(records),
        OutputFormat::Id => {
            for r in records {
                for file in &r.files {
                    emit(file);
                }
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.load_preset(UTF8_BORDERS_ONLY);
            if !ctx.no_header {
                table.set_header(["SUBJECT", "SESSION", "RUN", "FILES"]);
            }
            for r in records {
                table.add_row([
                    r.subject.as_str(),
                    r.session.as_str(),
                    &run_cell(r.run.as_ref()),
                    &r.files.join("\n"),
                ]);
            }
            emit(&table.to_string());
        }
    }
}

fn run_cell(run: Option<&crate::layout::RunId>) -> String {
    run.map_or_else(|| "-".to_owned(), ToString::to_string)
}

// --- Output file ---

/// Write `value` to `path` as four-space indented JSON, replacing any existing file.
///
/// # Errors
///
/// Returns `QueryError::Json` if serialization fails, `QueryError::Write` if
/// the file cannot be written.
pub fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), QueryError> {
    let rendered = to_pretty_string(value)?;
    std::fs::write(path, rendered).map_err(|source| QueryError::Write {
        path: path.display().to_string(),
        source,
    })
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &crate::types::ErrorOutput, format: OutputFormat) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    match format {
        OutputFormat::Json | OutputFormat::Pretty | OutputFormat::Compact | OutputFormat::Ndjson => {
            let s = to_spaced_string(err).unwrap_or_default();
            let _ = writeln!(out, "{s}");
        }
        OutputFormat::Table | OutputFormat::Id => {
            let _ = writeln!(out, "Error: {}", err.error.message);
        }
    }
}

// --- Debug timer ---

/// A RAII timer that prints elapsed milliseconds to stderr on drop.
///
/// Created via [`OutputCtx::timer`]. Does nothing when `debug` is false.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
    active: bool,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str, active: bool) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
            active,
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        if self.active {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            eprintln!("[debug] {}: {ms:.2}ms", self.label);
        }
    }
}

// --- Stdout ---

/// Write one line to stdout. A closed reader (`| head`) ends output quietly.
fn emit(text: &str) {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = write_line(&mut out, text) {
        eprintln!("stdout write error: {e}");
    }
}

fn write_line<W: Write>(out: &mut W, text: &str) -> std::io::Result<()> {
    match writeln!(out, "{text}") {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

// --- Generic JSON helpers ---

fn print_pretty_json<T: Serialize + ?Sized>(value: &T) {
    match to_pretty_string(value) {
        Ok(s) => emit(&s),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}

fn print_spaced_json<T: Serialize + ?Sized>(value: &T) {
    match to_spaced_string(value) {
        Ok(s) => emit(&s),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}

fn print_ndjson<T: Serialize>(values: &[T]) {
    for v in values {
        match serde_json::to_string(v) {
            Ok(s) => emit(&s),
            Err(e) => eprintln!("JSON serialization error: {e}"),
        }
    }
}
