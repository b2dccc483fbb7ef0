//! Live filesystem adapter using `std::fs`.

use std::io::Write as _;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::ports::filesystem::FileSystem;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::read_to_string(path)?)
    }

    /// Writes through a temporary sibling file which is then renamed over
    /// `path`, so a crash mid-write leaves the previous contents intact.
    ///
    /// An existing file keeps its permissions, and a symlink keeps pointing
    /// at its target, which receives the new contents.
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let existing = std::fs::metadata(path).ok();
        let target =
            if existing.is_some() { std::fs::canonicalize(path)? } else { path.to_path_buf() };
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(contents.as_bytes())?;
        if let Some(meta) = existing {
            tmp.as_file().set_permissions(meta.permissions())?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&target)?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let name = entry.file_name().into_string().map_err(|name| {
                format!("non-UTF-8 entry {} in {}", name.to_string_lossy(), path.display())
            })?;
            entries.push(name);
        }
        entries.sort();
        Ok(entries)
    }
}
