//! Core library entry for the `bower-away` CLI.
//!
//! `bower-away` walks a project from Bower to Yarn one step per run. The
//! interesting part is [`manifest::reconcile`], which folds the installed
//! Bower components into `package.json`.

pub mod adapters;
pub mod checklist;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod logging;
pub mod manifest;
pub mod ports;
pub mod store;

use clap::error::ErrorKind;
use clap::Parser;

pub use commands::Status;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or the migration step
/// fails.
pub fn run<I, T>(args: I) -> Result<Status, String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(Status::Done);
        }
        Err(err) => return Err(err.to_string()),
    };
    logging::init(cli.verbose);
    commands::dispatch(&cli)
}
