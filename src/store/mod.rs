//! Project store: reads the installed Bower components and reads and writes
//! `package.json`.
//!
//! All I/O goes through `ctx.fs`. Layout of a project being migrated:
//!
//! ```text
//! <root>/
//!   ├── bower.json
//!   ├── package.json
//!   └── bower_components/
//!       └── <name>/.bower.json
//! ```

use std::path::{Path, PathBuf};

use crate::context::ServiceContext;
use crate::manifest::{
    parse_descriptor, LegacyPackageDescriptor, Manifest, MigrateError, DESCRIPTOR_FILE,
    MANIFEST_FILE,
};

/// Persistence layer for one project directory.
pub struct ProjectStore<'a> {
    ctx: &'a ServiceContext,
    root: PathBuf,
}

impl<'a> ProjectStore<'a> {
    /// Creates a store for the project at `root`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, root: &Path) -> Self {
        Self { ctx, root: root.to_path_buf() }
    }

    /// Path of the project's `package.json`.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// Loads `package.json`, or an empty manifest when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error naming the file if it cannot be read or parsed.
    pub fn load_manifest(&self) -> Result<Manifest, MigrateError> {
        let path = self.manifest_path();
        if !self.ctx.fs.exists(&path) {
            tracing::debug!(path = %path.display(), "no package.json yet");
            return Ok(Manifest::new());
        }
        let text = self
            .ctx
            .fs
            .read_to_string(&path)
            .map_err(|e| MigrateError::Read { path: path.clone(), source: e })?;
        Manifest::parse(&path, &text)
    }

    /// Writes `manifest` as pretty JSON in place of `package.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails; the previous
    /// file is left intact in that case.
    pub fn save_manifest(&self, manifest: &Manifest) -> Result<(), MigrateError> {
        let path = self.manifest_path();
        let text = manifest.to_pretty_json()?;
        self.ctx
            .fs
            .write(&path, &text)
            .map_err(|e| MigrateError::Write { path: path.clone(), source: e })?;
        tracing::info!(path = %path.display(), "updated package.json");
        Ok(())
    }

    /// Reads the descriptor of every package installed in `components_dir`.
    ///
    /// Plain files in the directory are skipped. Descriptors come back sorted
    /// by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed, or if a package's
    /// `.bower.json` is missing or malformed.
    pub fn list_descriptors(
        &self,
        components_dir: &Path,
    ) -> Result<Vec<LegacyPackageDescriptor>, MigrateError> {
        let entries = self.ctx.fs.list_dir(components_dir).map_err(|e| MigrateError::Read {
            path: components_dir.to_path_buf(),
            source: e,
        })?;

        let mut descriptors = Vec::with_capacity(entries.len());
        for name in entries {
            let package_dir = components_dir.join(&name);
            if !self.ctx.fs.is_dir(&package_dir) {
                tracing::debug!(entry = %name, "skipping non-directory in components");
                continue;
            }
            let path = package_dir.join(DESCRIPTOR_FILE);
            let text = self
                .ctx
                .fs
                .read_to_string(&path)
                .map_err(|e| MigrateError::Read { path: path.clone(), source: e })?;
            descriptors.push(parse_descriptor(&name, &path, &text)?);
        }
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::debug!(count = descriptors.len(), "read bower components");
        Ok(descriptors)
    }
}
