//! Executable lookup port.

use std::path::PathBuf;

/// Locates external executables.
///
/// The migration never runs `yarn` or `bower` itself; it only checks
/// whether the user has them installed.
pub trait ExecutableLocator: Send + Sync {
    /// Returns the resolved path of `name`, or `None` when it is not installed.
    fn locate(&self, name: &str) -> Option<PathBuf>;
}
