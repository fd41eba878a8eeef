//! Command-line tests for the `autoinit` binary.
//!
//! Each test lays out a small package graph in a temp dir and runs the
//! binary against it.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn autoinit() -> Command {
    let mut cmd = Command::cargo_bin("autoinit").expect("autoinit binary");
    cmd.env_remove("RUST_LOG").env_remove("AUTOINIT_CONDITIONS");
    cmd
}

fn write(root: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

fn canonical(path: &Path) -> String {
    fs::canonicalize(path).unwrap().display().to_string()
}

/// app -> {ui, shared}, ui -> {shared, theme}, theme -> ui (cycle).
/// `shared` and `theme` declare auto-init modules.
fn workspace() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "package.json",
        r#"{"name": "app", "dependencies": {"ui": "*", "shared": "*"}}"#,
    );
    let main = write(root, "main.js", "import 'virtual:init-all-packages';\n");
    write(
        root,
        "node_modules/ui/package.json",
        r#"{"name": "ui", "dependencies": {"shared": "*", "theme": "*"}}"#,
    );
    write(
        root,
        "node_modules/shared/package.json",
        r#"{"name": "shared", "customAutoInit": "./autoInit.js", "dependencies": {}}"#,
    );
    write(root, "node_modules/shared/autoInit.js", "globalThis.count = (globalThis.count ?? 0) + 1;\n");
    write(
        root,
        "node_modules/theme/package.json",
        r#"{
            "name": "theme",
            "customAutoInit": "./register",
            "exports": { "./register": { "import": "./esm/register.mjs", "default": "./register.js" } },
            "dependencies": {"ui": "*"}
        }"#,
    );
    write(root, "node_modules/theme/esm/register.mjs", "");
    write(root, "node_modules/theme/register.js", "");
    (dir, main)
}

#[test]
fn test_generate_prints_each_module_once() {
    let (dir, main) = workspace();
    let shared = canonical(&dir.path().join("node_modules/shared/autoInit.js"));
    let theme = canonical(&dir.path().join("node_modules/theme/esm/register.mjs"));

    let output = autoinit().arg("generate").arg(&main).output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let expected = format!("import \"{shared}\";\nimport \"{theme}\";\n");
    assert_eq!(stdout, expected);
}

#[test]
fn test_generate_honours_conditions() {
    let (dir, main) = workspace();
    let theme = canonical(&dir.path().join("node_modules/theme/register.js"));

    autoinit()
        .args(["--condition", "require"])
        .arg("generate")
        .arg(&main)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("import \"{theme}\";")));
}

#[test]
fn test_generate_to_file() {
    let (dir, main) = workspace();
    let out = dir.path().join("out/auto-init.js");
    fs::create_dir_all(out.parent().unwrap()).unwrap();

    autoinit()
        .arg("generate")
        .arg(&main)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written.lines().count(), 2);
    assert!(written.lines().all(|line| line.starts_with("import \"")));
}

#[test]
fn test_discover_json_reports_cycle() {
    let (dir, _main) = workspace();
    let manifest = dir.path().join("package.json");

    let output = autoinit().arg("discover").arg(&manifest).arg("--json").output().unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["modules"].as_array().unwrap().len(), 2);
    assert_eq!(report["visited"].as_array().unwrap().len(), 4);

    let cycles = report["cycles"].as_array().unwrap();
    assert_eq!(cycles.len(), 1);
    assert!(cycles[0]["from"].as_str().unwrap().ends_with("theme/package.json"));
    assert!(cycles[0]["to"].as_str().unwrap().ends_with("ui/package.json"));
}

#[test]
fn test_empty_graph_generates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "package.json", r#"{"name": "solo"}"#);
    let main = write(dir.path(), "main.js", "");

    autoinit()
        .arg("generate")
        .arg(&main)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_invalid_manifest_fails_with_path() {
    let (dir, main) = workspace();
    let broken = dir.path().join("node_modules/ui/package.json");
    fs::write(&broken, "{\n  \"name\": \"ui\",\n  \"dependencies\": {\n}").unwrap();

    autoinit()
        .arg("generate")
        .arg(&main)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to parse package.json"))
        .stderr(predicate::str::contains("ui"));
}

#[test]
fn test_missing_dependency_fails() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "package.json", r#"{"name": "app", "dependencies": {"ghost": "*"}}"#);
    let main = write(dir.path(), "main.js", "");

    autoinit()
        .arg("generate")
        .arg(&main)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to locate package.json of dependency ghost"));
}

#[test]
fn test_importer_without_sibling_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let main = write(dir.path(), "src/main.js", "");
    write(dir.path(), "package.json", "{}");

    autoinit()
        .arg("generate")
        .arg(&main)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expected package.json file in"));
}

#[test]
fn test_missing_importer() {
    let dir = tempfile::tempdir().unwrap();

    autoinit()
        .arg("generate")
        .arg(dir.path().join("nope.js"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Importer must be a real file"));
}

#[test]
fn test_virtual_id_shows_marker() {
    let (_dir, main) = workspace();

    autoinit()
        .arg("virtual-id")
        .arg(&main)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("\\0auto-init?from="))
        .stdout(predicate::str::contains("&noext"));
}

#[test]
fn test_help_lists_commands() {
    autoinit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("discover"))
        .stdout(predicate::str::contains("virtual-id"));
}
