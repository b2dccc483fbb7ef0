//! Manifest data model: legacy package descriptors, the Yarn `package.json`,
//! and the errors raised while reading or reconciling them.

pub mod diff;
pub mod reconcile;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Key prefix under which Bower packages are stored in `dependencies`.
pub const MIGRATED_NAMESPACE: &str = "@bower_components";

/// File name of the Yarn manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// File name of the Bower manifest.
pub const LEGACY_MANIFEST_FILE: &str = "bower.json";

/// Per-package metadata file Bower writes into each installed component.
pub const DESCRIPTOR_FILE: &str = ".bower.json";

/// Error type returned by the port traits.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while reading, reconciling, or writing manifests.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// A file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File that could not be read.
        path: PathBuf,
        /// Error reported by the filesystem port.
        #[source]
        source: PortError,
    },
    /// A file was read but is not the JSON we expected.
    #[error("failed to parse {}: {source}", path.display())]
    Malformed {
        /// File that failed to parse.
        path: PathBuf,
        /// Parse error with line and column.
        source: serde_json::Error,
    },
    /// A manifest field has the wrong JSON type.
    #[error("package.json field `{field}` must be {expected}")]
    UnexpectedShape {
        /// Dotted path of the offending field.
        field: String,
        /// Human description of the expected type.
        expected: &'static str,
    },
    /// Two legacy packages map to the same migrated key with different pins.
    #[error("conflicting versions for bower package `{name}`: `{first}` and `{second}`")]
    ConflictingPackage {
        /// Package name shared by both descriptors.
        name: String,
        /// Version pin of the first descriptor.
        first: String,
        /// Version pin of the second descriptor.
        second: String,
    },
    /// The expected manifest could not be serialized.
    #[error("failed to serialize package.json: {source}")]
    Serialize {
        /// Serializer error.
        source: serde_json::Error,
    },
    /// The manifest could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Destination file.
        path: PathBuf,
        /// Error reported by the filesystem port.
        #[source]
        source: PortError,
    },
}

/// One installed Bower dependency, read from `<components>/<name>/.bower.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyPackageDescriptor {
    /// Directory name inside the components directory.
    pub name: String,
    /// Where Bower fetched the package from (`_source`).
    pub source_url: String,
    /// Version, tag, or branch Bower resolved (`_target`).
    pub target_spec: String,
}

impl LegacyPackageDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        source_url: impl Into<String>,
        target_spec: impl Into<String>,
    ) -> Self {
        Self { name: name.into(), source_url: source_url.into(), target_spec: target_spec.into() }
    }

    /// The `dependencies` key this package is stored under.
    #[must_use]
    pub fn migrated_key(&self) -> String {
        migrated_key(&self.name)
    }
}

/// Returns the `dependencies` key for a Bower package name.
#[must_use]
pub fn migrated_key(name: &str) -> String {
    format!("{MIGRATED_NAMESPACE}/{name}")
}

/// Returns `true` if a `dependencies` key belongs to the migrated namespace.
#[must_use]
pub fn is_migrated_key(key: &str) -> bool {
    key.strip_prefix(MIGRATED_NAMESPACE).is_some_and(|rest| rest.starts_with('/'))
}

/// Raw shape of a `.bower.json` file; other fields are ignored.
#[derive(Debug, Deserialize)]
struct BowerMetadata {
    #[serde(rename = "_source")]
    source: String,
    #[serde(rename = "_target")]
    target: String,
}

/// Parses the `.bower.json` of the package installed as `name`.
///
/// # Errors
///
/// Returns [`MigrateError::Malformed`] naming `path` when the text is not a
/// JSON object with string `_source` and `_target` fields.
pub fn parse_descriptor(
    name: &str,
    path: &Path,
    text: &str,
) -> Result<LegacyPackageDescriptor, MigrateError> {
    let meta: BowerMetadata = serde_json::from_str(text)
        .map_err(|source| MigrateError::Malformed { path: path.to_path_buf(), source })?;
    Ok(LegacyPackageDescriptor::new(name, meta.source, meta.target))
}

/// A `package.json` document.
///
/// Wraps the top-level JSON object so every field, including ones this tool
/// knows nothing about, survives a read-modify-write cycle in its original
/// order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    fields: Map<String, Value>,
}

impl Manifest {
    /// Creates an empty manifest (`{}`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses manifest text read from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::Malformed`] naming `path` when the text is not
    /// a JSON object.
    pub fn parse(path: &Path, text: &str) -> Result<Self, MigrateError> {
        serde_json::from_str(text)
            .map_err(|source| MigrateError::Malformed { path: path.to_path_buf(), source })
    }

    /// Wraps a JSON value, returning `None` unless it is an object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// Returns the manifest as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    /// Returns a top-level field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Top-level fields in document order.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub(crate) fn fields_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.fields
    }

    /// Returns `true` if any dependency lives in the migrated namespace.
    #[must_use]
    pub fn has_migrated_dependencies(&self) -> bool {
        self.fields
            .get("dependencies")
            .and_then(Value::as_object)
            .is_some_and(|deps| deps.keys().any(|k| is_migrated_key(k)))
    }

    /// Serializes as pretty JSON with a 2-space indent and a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::Serialize`] if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String, MigrateError> {
        let mut text = serde_json::to_string_pretty(&self.fields)
            .map_err(|source| MigrateError::Serialize { source })?;
        text.push('\n');
        Ok(text)
    }
}
