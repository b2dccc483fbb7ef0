//! End-to-end reconciliation against a real project directory.

use std::path::Path;

use serde_json::json;
use tempfile::TempDir;

use bower_away::adapters::live::LiveFileSystem;
use bower_away::adapters::memory::FixedExecutables;
use bower_away::checklist::{next_step, Outcome, Request};
use bower_away::context::ServiceContext;
use bower_away::manifest::reconcile::{reconcile, ReconcileOptions};
use bower_away::manifest::Manifest;
use bower_away::store::ProjectStore;

fn context() -> ServiceContext {
    ServiceContext::new(Box::new(LiveFileSystem), Box::new(FixedExecutables::new(["yarn", "bower"])))
}

fn install(root: &Path, name: &str, source: &str, target: &str) {
    let dir = root.join("bower_components").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(".bower.json"), json!({"_source": source, "_target": target}).to_string())
        .unwrap();
}

#[test]
fn apply_then_reconcile_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    std::fs::write(root.join("bower.json"), "{}").unwrap();
    std::fs::write(
        root.join("package.json"),
        r#"{"name": "app", "dependencies": {"jquery": "^1.12.0"}, "scripts": {"build": "gulp"}}"#,
    )
    .unwrap();
    install(root, "jquery", "https://github.com/jquery/jquery.git", "3.5.0");
    install(root, "private-lib", "git+ssh://example.com/x.git", "v2");

    let ctx = context();
    next_step(&ctx, root, Request::Apply).unwrap();

    let store = ProjectStore::new(&ctx, root);
    let written = store.load_manifest().unwrap();
    assert_eq!(
        written.get("dependencies"),
        Some(&json!({
            "jquery": "^1.12.0",
            "@bower_components/jquery": "jquery/jquery#3.5.0",
            "@bower_components/private-lib": "git+ssh://example.com/x.git#v2"
        }))
    );
    assert_eq!(written.get("scripts").unwrap()["build"], json!("gulp"));

    let descriptors = store.list_descriptors(&root.join("bower_components")).unwrap();
    let second =
        reconcile(&descriptors, &written, &ReconcileOptions::linking("bower_components")).unwrap();
    assert!(!second.differs);
}

#[test]
fn missing_manifest_is_created_on_apply() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    std::fs::write(root.join("bower.json"), "{}").unwrap();
    install(root, "jquery", "https://github.com/jquery/jquery.git", "3.5.0");

    let progress = next_step(&context(), root, Request::Apply).unwrap();
    assert!(matches!(progress.outcome, Outcome::Pending(_)));

    let text = std::fs::read_to_string(root.join("package.json")).unwrap();
    let manifest = Manifest::parse(&root.join("package.json"), &text).unwrap();
    assert!(manifest.has_migrated_dependencies());
    assert!(text.ends_with("}\n"));
}

#[test]
fn plain_reconciliation_of_fresh_project() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    install(root, "jquery", "https://github.com/jquery/jquery.git", "3.5.0");

    let ctx = context();
    let store = ProjectStore::new(&ctx, root);
    let descriptors = store.list_descriptors(&root.join("bower_components")).unwrap();
    let result = reconcile(&descriptors, &Manifest::new(), &ReconcileOptions::default()).unwrap();

    assert!(result.differs);
    assert_eq!(
        result.expected.to_value(),
        json!({
            "dependencies": {"@bower_components/jquery": "jquery/jquery#3.5.0"},
            "engines": {"yarn": ">= 1.0.0"}
        })
    );
}

#[test]
fn up_to_date_manifest_is_never_written() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    std::fs::write(root.join("bower.json"), "{}").unwrap();
    install(root, "jquery", "https://github.com/jquery/jquery.git", "3.5.0");

    let ctx = context();
    let store = ProjectStore::new(&ctx, root);
    let descriptors = store.list_descriptors(&root.join("bower_components")).unwrap();
    let migrated = reconcile(
        &descriptors,
        &Manifest::new(),
        &ReconcileOptions::linking("bower_components"),
    )
    .unwrap();
    // Same content, different key order and formatting than the tool writes.
    let reversed: serde_json::Map<String, serde_json::Value> = migrated
        .expected
        .fields()
        .iter()
        .rev()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    let text = serde_json::to_string(&reversed).unwrap();
    std::fs::write(root.join("package.json"), &text).unwrap();

    next_step(&ctx, root, Request::Apply).unwrap();

    assert_eq!(std::fs::read_to_string(root.join("package.json")).unwrap(), text);
}
