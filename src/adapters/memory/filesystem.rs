//! In-memory `FileSystem` adapter.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::ports::filesystem::FileSystem;

#[derive(Default)]
struct State {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    writes: usize,
}

/// Filesystem held entirely in memory.
///
/// Directories are implied by the files beneath them and can also be
/// created empty with [`MemoryFileSystem::with_dir`].
#[derive(Default)]
pub struct MemoryFileSystem {
    state: Mutex<State>,
    read_only: bool,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, returning `self` for chaining.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.lock().files.insert(path.into(), contents.into());
        self
    }

    /// Adds an empty directory, returning `self` for chaining.
    #[must_use]
    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        self.lock().dirs.insert(path.into());
        self
    }

    /// Makes every subsequent `write` fail, as on a read-only mount.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Returns the current contents of a file, if present.
    #[must_use]
    pub fn contents(&self, path: &Path) -> Option<String> {
        self.lock().files.get(path).cloned()
    }

    /// Number of successful writes performed so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // A poisoned lock only means another test thread panicked.
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.lock()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.read_only {
            return Err(format!("Read-only filesystem: {}", path.display()).into());
        }
        let mut state = self.lock();
        state.files.insert(path.to_path_buf(), contents.to_string());
        state.writes += 1;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let is_file = self.lock().files.contains_key(path);
        is_file || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let state = self.lock();
        state.dirs.iter().any(|d| d.starts_with(path))
            || state.files.keys().any(|k| k.starts_with(path) && k != path)
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        if !self.is_dir(path) {
            return Err(format!("Not a directory: {}", path.display()).into());
        }
        let state = self.lock();
        let names: BTreeSet<String> = state
            .files
            .keys()
            .chain(state.dirs.iter())
            .filter_map(|k| k.strip_prefix(path).ok())
            .filter_map(|rest| rest.components().next())
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Ok(names.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_imply_parent_directories() {
        let fs = MemoryFileSystem::new().with_file("/p/bower_components/jquery/.bower.json", "{}");

        assert!(fs.is_dir(Path::new("/p/bower_components")));
        assert!(fs.is_dir(Path::new("/p/bower_components/jquery")));
        assert!(!fs.is_dir(Path::new("/p/bower_components/jquery/.bower.json")));
        assert!(fs.exists(Path::new("/p/bower_components/jquery/.bower.json")));
    }

    #[test]
    fn list_dir_returns_immediate_children_once() {
        let fs = MemoryFileSystem::new()
            .with_file("/c/b/.bower.json", "{}")
            .with_file("/c/b/bower.json", "{}")
            .with_file("/c/a/.bower.json", "{}")
            .with_dir("/c/empty");

        let names = fs.list_dir(Path::new("/c")).unwrap();
        assert_eq!(names, vec!["a", "b", "empty"]);
    }

    #[test]
    fn list_dir_on_missing_directory_errors() {
        let fs = MemoryFileSystem::new();
        assert!(fs.list_dir(Path::new("/nowhere")).is_err());
    }

    #[test]
    fn read_only_rejects_writes() {
        let fs = MemoryFileSystem::new().with_file("/p/package.json", "{}\n").read_only();

        assert!(fs.write(Path::new("/p/package.json"), "[]").is_err());
        assert_eq!(fs.contents(Path::new("/p/package.json")).as_deref(), Some("{}\n"));
        assert_eq!(fs.write_count(), 0);
    }
}
