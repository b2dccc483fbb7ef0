//! Service context bundling all port trait objects.

use crate::adapters::live::{LiveExecutableLocator, LiveFileSystem};
use crate::ports::executables::ExecutableLocator;
use crate::ports::filesystem::FileSystem;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live or in-memory).
pub struct ServiceContext {
    /// Filesystem for reading the project and writing `package.json`.
    pub fs: Box<dyn FileSystem>,
    /// Lookup for the `yarn` and `bower` executables.
    pub executables: Box<dyn ExecutableLocator>,
}

impl ServiceContext {
    /// Creates a live context backed by the real disk and `$PATH`.
    #[must_use]
    pub fn live() -> Self {
        Self { fs: Box::new(LiveFileSystem), executables: Box::new(LiveExecutableLocator) }
    }

    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(fs: Box<dyn FileSystem>, executables: Box<dyn ExecutableLocator>) -> Self {
        Self { fs, executables }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use super::*;
    use crate::adapters::memory::{FixedExecutables, MemoryFileSystem};

    #[test]
    fn shared_memory_filesystem_observes_writes() {
        let fs = Arc::new(MemoryFileSystem::new());
        let ctx = ServiceContext::new(
            Box::new(Arc::clone(&fs)),
            Box::new(FixedExecutables::new(["yarn"])),
        );

        ctx.fs.write(Path::new("/p/package.json"), "{}\n").unwrap();

        assert_eq!(fs.contents(Path::new("/p/package.json")).as_deref(), Some("{}\n"));
        assert!(ctx.executables.locate("yarn").is_some());
        assert!(ctx.executables.locate("bower").is_none());
    }
}
