//! Command dispatch and handlers.

pub mod migrate;

use std::env;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::context::ServiceContext;

/// How a run ended, mapped to the process exit code by `main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Migration finished, or a requested preview was shown.
    Done,
    /// The user has to act and run the tool again.
    Pending,
}

/// Dispatch parsed arguments against the live filesystem and `$PATH`.
///
/// # Errors
///
/// Returns an error string if the project directory cannot be determined or
/// the migration step fails.
pub fn dispatch(cli: &Cli) -> Result<Status, String> {
    let cwd = project_dir(cli)?;
    tracing::debug!(cwd = %cwd.display(), "inspecting project");
    let ctx = ServiceContext::live();
    migrate::run(&ctx, &cwd, cli.request())
}

fn project_dir(cli: &Cli) -> Result<PathBuf, String> {
    let current =
        env::current_dir().map_err(|e| format!("failed to get current directory: {e}"))?;
    Ok(match &cli.cwd {
        Some(dir) => current.join(dir),
        None => current,
    })
}
