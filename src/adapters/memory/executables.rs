//! Fixed executable locator.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::ports::executables::ExecutableLocator;

/// Reports a fixed set of executables as installed under `/usr/bin`.
#[derive(Debug, Clone, Default)]
pub struct FixedExecutables {
    installed: BTreeSet<String>,
}

impl FixedExecutables {
    /// Creates a locator where exactly `names` are installed.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { installed: names.into_iter().map(Into::into).collect() }
    }
}

impl ExecutableLocator for FixedExecutables {
    fn locate(&self, name: &str) -> Option<PathBuf> {
        self.installed.contains(name).then(|| PathBuf::from("/usr/bin").join(name))
    }
}
