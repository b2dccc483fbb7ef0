//! The migration checklist.
//!
//! Every invocation re-inspects the project and stops at the first step that
//! is not yet satisfied. Nothing is remembered between runs: the project
//! directory itself is the state.

pub mod steps;

use std::path::Path;

use crate::config::BowerConfig;
use crate::context::ServiceContext;
use crate::manifest::diff::{diff_manifests, Change};
use crate::manifest::reconcile::{reconcile, ReconcileOptions};
use crate::manifest::{MigrateError, LEGACY_MANIFEST_FILE, MIGRATED_NAMESPACE};
use crate::store::ProjectStore;

pub use steps::Step;

/// What the user asked to do with pending `package.json` changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Request {
    /// Only report the next step.
    #[default]
    Inspect,
    /// Preview pending changes.
    Diff,
    /// Write pending changes.
    Apply,
}

/// Where the checklist stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The user has to act on this step, then run the tool again.
    Pending(Step),
    /// Changes `--apply` would make to `package.json`.
    Preview(Vec<Change>),
    /// Nothing left to do.
    Done(Step),
}

/// The checklist's verdict for this run.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Titles of the steps already satisfied, in order.
    pub completed: Vec<&'static str>,
    /// Where the checklist stopped.
    pub outcome: Outcome,
}

/// Finds the next unmet migration step for the project at `cwd`.
///
/// With [`Request::Apply`] pending `package.json` changes are written and the
/// checklist moves on; this is the only operation that modifies the project.
///
/// # Errors
///
/// Returns an error if a configuration or manifest file is malformed, if two
/// components conflict, or if writing `package.json` fails.
pub fn next_step(
    ctx: &ServiceContext,
    cwd: &Path,
    request: Request,
) -> Result<Progress, MigrateError> {
    let mut completed = Vec::new();
    let outcome = walk(ctx, cwd, request, &mut completed)?;
    tracing::debug!(completed = completed.len(), "checklist evaluated");
    Ok(Progress { completed, outcome })
}

fn walk(
    ctx: &ServiceContext,
    cwd: &Path,
    request: Request,
    completed: &mut Vec<&'static str>,
) -> Result<Outcome, MigrateError> {
    let fs = &ctx.fs;
    let legacy_manifest = cwd.join(LEGACY_MANIFEST_FILE);
    let migrated_dir = cwd.join("node_modules").join(MIGRATED_NAMESPACE);

    if !fs.exists(&legacy_manifest) {
        if fs.is_dir(&migrated_dir) {
            return Ok(Outcome::Done(steps::done()));
        }
        return Ok(Outcome::Pending(steps::browse_to_project()));
    }
    completed.push(steps::BROWSE_TO_PROJECT);

    if ctx.executables.locate("yarn").is_none() {
        return Ok(Outcome::Pending(steps::install_yarn()));
    }
    completed.push(steps::INSTALL_YARN);

    if ctx.executables.locate("bower").is_none() {
        return Ok(Outcome::Pending(steps::install_bower()));
    }
    completed.push(steps::INSTALL_BOWER);

    let config = BowerConfig::read(ctx, cwd)?;
    let components_dir = config.components_dir(cwd);
    let components = config.relative_components_dir(cwd);
    let has_components = fs.is_dir(&components_dir);

    let store = ProjectStore::new(ctx, cwd);
    let original = store.load_manifest()?;

    if !has_components && !original.has_migrated_dependencies() {
        return Ok(Outcome::Pending(steps::install_with_bower(&components_dir)));
    }
    completed.push(steps::INSTALL_WITH_BOWER);

    if has_components {
        let descriptors = store.list_descriptors(&components_dir)?;
        let result = reconcile(&descriptors, &original, &ReconcileOptions::linking(&components))?;
        if result.differs {
            match request {
                Request::Diff => {
                    return Ok(Outcome::Preview(diff_manifests(&original, &result.expected)))
                }
                Request::Apply => store.save_manifest(&result.expected)?,
                Request::Inspect => return Ok(Outcome::Pending(steps::update_manifest())),
            }
        }
    }
    completed.push(steps::UPDATE_MANIFEST);

    if fs.is_dir(&components_dir) {
        return Ok(Outcome::Pending(steps::remove_components(&components)));
    }
    completed.push(steps::REMOVE_COMPONENTS);

    if !fs.is_dir(&migrated_dir) {
        return Ok(Outcome::Pending(steps::install_with_yarn()));
    }
    completed.push(steps::INSTALL_WITH_YARN);

    if fs.exists(&legacy_manifest) {
        return Ok(Outcome::Pending(steps::remove_bower_files()));
    }

    Ok(Outcome::Done(steps::done()))
}
