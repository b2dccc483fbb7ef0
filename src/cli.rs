//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::checklist::Request;

/// Top-level CLI parser for `bower-away`.
#[derive(Debug, Parser)]
#[command(
    name = "bower-away",
    version,
    about = "Convert a Bower project to Yarn, one step at a time",
    long_about = "Please call this command for next step to convert your project to Yarn.\n\n\
                  Each run checks the project and prints the single next thing to do."
)]
pub struct Cli {
    /// Preview the changes to package.json.
    #[arg(long, conflicts_with = "apply")]
    pub diff: bool,

    /// Write the changes to package.json.
    #[arg(long)]
    pub apply: bool,

    /// Project directory (defaults to the current directory).
    #[arg(short = 'C', long = "cwd", value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// What to do with pending `package.json` changes.
    #[must_use]
    pub fn request(&self) -> Request {
        if self.apply {
            Request::Apply
        } else if self.diff {
            Request::Diff
        } else {
            Request::Inspect
        }
    }
}
