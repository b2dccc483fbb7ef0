//! Manifest reconciliation: derives the `package.json` a project should have
//! once its Bower components are installed through Yarn.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::{is_migrated_key, LegacyPackageDescriptor, Manifest, MigrateError};

/// Repository host whose URLs Yarn accepts in `owner/repo` shorthand.
pub const GITHUB_PREFIX: &str = "https://github.com/";

/// Engine entry the migrated manifest requires.
pub const ENGINE_NAME: &str = "yarn";

/// Minimum Yarn version able to install `@bower_components` aliases.
pub const MINIMUM_ENGINE: &str = ">= 1.0.0";

/// Substring identifying a postinstall script that already links components.
pub const LINK_MARKER: &str = "symlinkSync";

/// Substring identifying a postinstall script that still runs Bower.
pub const LEGACY_INSTALL: &str = "bower install";

/// Tuning knobs for [`reconcile`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Components directory, relative to the project, to link back to
    /// `node_modules/@bower_components` after every install. `None` leaves
    /// `scripts.postinstall` alone.
    pub postinstall_link: Option<String>,
}

impl ReconcileOptions {
    /// Options that maintain a postinstall link to `components`.
    #[must_use]
    pub fn linking(components: impl Into<String>) -> Self {
        Self { postinstall_link: Some(components.into()) }
    }
}

/// Result of reconciling the descriptors against the current manifest.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// The manifest the project should have.
    pub expected: Manifest,
    /// Whether `expected` differs from the manifest on disk.
    pub differs: bool,
}

/// Derives the expected manifest and compares it with `original`.
///
/// # Errors
///
/// See [`derive_expected`].
pub fn reconcile(
    descriptors: &[LegacyPackageDescriptor],
    original: &Manifest,
    options: &ReconcileOptions,
) -> Result<Reconciliation, MigrateError> {
    let expected = derive_expected(descriptors, original, options)?;
    let differs = differs(original, &expected);
    tracing::debug!(packages = descriptors.len(), differs, "reconciled package.json");
    Ok(Reconciliation { expected, differs })
}

/// Returns the `package.json` a project should have after migration.
///
/// Starting from a copy of `original`:
/// - every descriptor becomes `dependencies["@bower_components/<name>"]`,
///   and migrated entries for packages no longer installed are dropped;
/// - `engines.yarn` is set to [`MINIMUM_ENGINE`] unless already constrained;
/// - with [`ReconcileOptions::postinstall_link`], `scripts.postinstall`
///   links the old components directory to the new location.
///
/// Fields outside those are left untouched. `original` is never modified.
///
/// # Errors
///
/// Returns [`MigrateError::ConflictingPackage`] if two descriptors share a
/// name but pin different versions, and [`MigrateError::UnexpectedShape`] if
/// `dependencies`, `scripts`, or `scripts.postinstall` has the wrong type.
pub fn derive_expected(
    descriptors: &[LegacyPackageDescriptor],
    original: &Manifest,
    options: &ReconcileOptions,
) -> Result<Manifest, MigrateError> {
    let pins = expected_pins(descriptors)?;
    let mut expected = original.clone();
    let fields = expected.fields_mut();

    if !pins.is_empty() || fields.contains_key("dependencies") {
        let deps = object_field(fields, "dependencies")?;
        deps.retain(|key, _| !is_migrated_key(key) || pins.contains_key(key));
        for (key, pin) in pins {
            deps.insert(key, Value::String(pin));
        }
    }

    ensure_engine(fields);

    if let Some(components) = &options.postinstall_link {
        let scripts = object_field(fields, "scripts")?;
        let current = match scripts.get("postinstall") {
            None | Some(Value::Null) => None,
            Some(Value::String(script)) => Some(script.as_str()),
            Some(_) => {
                return Err(MigrateError::UnexpectedShape {
                    field: "scripts.postinstall".to_string(),
                    expected: "a string",
                })
            }
        };
        let script = PostinstallScript::classify(current).render(&link_script(components));
        scripts.insert("postinstall".to_string(), Value::String(script));
    }

    Ok(expected)
}

/// Shortens a GitHub URL to the `owner/repo` form; other sources pass through.
#[must_use]
pub fn normalize_source(source_url: &str) -> &str {
    match source_url.strip_prefix(GITHUB_PREFIX) {
        Some(rest) => rest.strip_suffix(".git").unwrap_or(rest),
        None => source_url,
    }
}

/// The `source#target` value a descriptor is pinned to.
#[must_use]
pub fn version_pin(descriptor: &LegacyPackageDescriptor) -> String {
    format!("{}#{}", normalize_source(&descriptor.source_url), descriptor.target_spec)
}

/// Maps migrated keys to pins, sorted by key so listing order never matters.
fn expected_pins(
    descriptors: &[LegacyPackageDescriptor],
) -> Result<BTreeMap<String, String>, MigrateError> {
    let mut pins: BTreeMap<String, String> = BTreeMap::new();
    for descriptor in descriptors {
        let pin = version_pin(descriptor);
        let key = descriptor.migrated_key();
        if let Some(existing) = pins.get(&key) {
            if *existing != pin {
                let (first, second) =
                    if *existing < pin { (existing.clone(), pin) } else { (pin, existing.clone()) };
                return Err(MigrateError::ConflictingPackage {
                    name: descriptor.name.clone(),
                    first,
                    second,
                });
            }
            continue;
        }
        pins.insert(key, pin);
    }
    Ok(pins)
}

/// Returns the object stored at `field`, creating it when absent.
fn object_field<'a>(
    fields: &'a mut Map<String, Value>,
    field: &str,
) -> Result<&'a mut Map<String, Value>, MigrateError> {
    fields
        .entry(field)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| MigrateError::UnexpectedShape {
            field: field.to_string(),
            expected: "an object",
        })
}

fn ensure_engine(fields: &mut Map<String, Value>) {
    if !matches!(fields.get("engines"), Some(Value::Object(_))) {
        fields.insert("engines".to_string(), Value::Object(Map::new()));
    }
    if let Some(Value::Object(engines)) = fields.get_mut("engines") {
        let unconstrained = match engines.get(ENGINE_NAME) {
            None | Some(Value::Null | Value::Bool(false)) => true,
            Some(Value::String(range)) => range.is_empty(),
            Some(_) => false,
        };
        if unconstrained {
            engines.insert(ENGINE_NAME.to_string(), Value::String(MINIMUM_ENGINE.to_string()));
        }
    }
}

/// What the existing `scripts.postinstall` does, as far as migration cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostinstallScript {
    /// No postinstall script.
    Absent,
    /// A script that runs `bower install`, which Yarn replaces.
    LegacyInstall,
    /// A script that already links the components directory.
    Linked(String),
    /// An unrelated script that must keep running.
    Other(String),
}

impl PostinstallScript {
    /// Classifies the current script.
    #[must_use]
    pub fn classify(script: Option<&str>) -> Self {
        match script {
            None => Self::Absent,
            Some(s) if s.trim().is_empty() => Self::Absent,
            Some(s) if s.contains(LEGACY_INSTALL) => Self::LegacyInstall,
            Some(s) if s.contains(LINK_MARKER) => Self::Linked(s.to_string()),
            Some(s) => Self::Other(s.to_string()),
        }
    }

    /// The script to store, given the link command for this project.
    #[must_use]
    pub fn render(&self, link: &str) -> String {
        match self {
            Self::Absent | Self::LegacyInstall => link.to_string(),
            Self::Linked(existing) => existing.clone(),
            Self::Other(existing) => format!("{existing} && {link}"),
        }
    }
}

/// Node one-liner recreating `components` as a link to the Yarn-installed packages.
#[must_use]
pub fn link_script(components: &str) -> String {
    format!(
        "node -e \"try {{ require('fs').{LINK_MARKER}(require('path').resolve('node_modules/@bower_components'), '{components}', 'junction') }} catch (e) {{ }}\""
    )
}

/// Returns `true` if `expected` would change the manifest on disk.
#[must_use]
pub fn differs(original: &Manifest, expected: &Manifest) -> bool {
    !objects_equal(original.fields(), expected.fields())
}

/// Deep equality that ignores object key order and nothing else.
#[must_use]
pub fn structurally_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Object(a), Value::Object(b)) => objects_equal(a, b),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| structurally_equal(x, y))
        }
        _ => a == b,
    }
}

fn objects_equal(a: &Map<String, Value>, b: &Map<String, Value>) -> bool {
    a.len() == b.len()
        && a.iter().all(|(key, value)| b.get(key).is_some_and(|other| structurally_equal(value, other)))
}
