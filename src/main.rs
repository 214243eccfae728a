#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! bidsq — query subjects, sessions and runs of a BIDS dataset.

mod cli;
mod commands;
mod layout;
mod report;
mod types;

use clap::Parser;

use cli::{Cli, OutputCtx, write_error};
use types::ErrorOutput;

fn main() {
    let cli = Cli::parse();

    let ctx = OutputCtx::new(cli.output, cli.no_header, cli.debug);

    match commands::dispatch(&cli, &ctx) {
        Ok(()) => {}
        Err(err) => {
            let error_output = ErrorOutput::from_query_error(&err);
            write_error(&error_output, cli.output);
            std::process::exit(err.exit_code());
        }
    }
}
