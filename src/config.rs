//! Bower configuration: where the project keeps its components.
//!
//! Mirrors the one setting of bower's own config reader this tool needs:
//! `directory` from `.bowerrc`, overridable with the `bower_directory`
//! environment variable.

use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::context::ServiceContext;
use crate::manifest::MigrateError;

/// Bower's run-control file in the project root.
pub const BOWERRC_FILE: &str = ".bowerrc";

/// Components directory when none is configured.
pub const DEFAULT_DIRECTORY: &str = "bower_components";

/// Environment variable overriding the configured directory.
pub const DIRECTORY_ENV: &str = "bower_directory";

/// Subset of `.bowerrc` used by the migration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BowerConfig {
    /// Components directory, relative to the project root unless absolute.
    #[serde(default = "default_directory")]
    pub directory: String,
}

fn default_directory() -> String {
    DEFAULT_DIRECTORY.to_string()
}

impl Default for BowerConfig {
    fn default() -> Self {
        Self { directory: default_directory() }
    }
}

impl BowerConfig {
    /// Reads the configuration for the project at `cwd`, honoring the
    /// `bower_directory` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error naming `.bowerrc` if it exists but cannot be read or
    /// parsed.
    pub fn read(ctx: &ServiceContext, cwd: &Path) -> Result<Self, MigrateError> {
        let from_env = std::env::var(DIRECTORY_ENV).ok().filter(|d| !d.is_empty());
        Self::read_with(ctx, cwd, from_env)
    }

    /// Like [`BowerConfig::read`] with an explicit directory override.
    ///
    /// # Errors
    ///
    /// Returns an error naming `.bowerrc` if it exists but cannot be read or
    /// parsed.
    pub fn read_with(
        ctx: &ServiceContext,
        cwd: &Path,
        directory_override: Option<String>,
    ) -> Result<Self, MigrateError> {
        let path = cwd.join(BOWERRC_FILE);
        let mut config = if ctx.fs.exists(&path) {
            let text = ctx
                .fs
                .read_to_string(&path)
                .map_err(|e| MigrateError::Read { path: path.clone(), source: e })?;
            serde_json::from_str(&text)
                .map_err(|source| MigrateError::Malformed { path: path.clone(), source })?
        } else {
            Self::default()
        };

        if let Some(directory) = directory_override {
            config.directory = directory;
        }
        tracing::debug!(directory = %config.directory, "bower components directory");
        Ok(config)
    }

    /// Absolute path of the components directory.
    #[must_use]
    pub fn components_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.directory).components().filter(|c| *c != Component::CurDir).collect()
    }

    /// The components directory as written relative to `cwd`, with `/`
    /// separators. Falls back to the absolute path when it lies elsewhere.
    #[must_use]
    pub fn relative_components_dir(&self, cwd: &Path) -> String {
        let dir = self.components_dir(cwd);
        match dir.strip_prefix(cwd) {
            Ok(rel) => rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/"),
            Err(_) => dir.display().to_string(),
        }
    }
}
