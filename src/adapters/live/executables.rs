//! Live executable locator backed by `$PATH` lookups.

use std::path::PathBuf;

use crate::ports::executables::ExecutableLocator;

/// Resolves executables with the same search rules as the user's shell.
pub struct LiveExecutableLocator;

impl ExecutableLocator for LiveExecutableLocator {
    fn locate(&self, name: &str) -> Option<PathBuf> {
        match which::which(name) {
            Ok(path) => {
                tracing::debug!(name, path = %path.display(), "found executable");
                Some(path)
            }
            Err(err) => {
                tracing::debug!(name, %err, "executable not found");
                None
            }
        }
    }
}
