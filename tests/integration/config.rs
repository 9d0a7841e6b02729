//! `.normalize-pkg.toml` and `NORMALIZE_PKG_CONFIG` through the binary.

use assert_cmd::Command;
use normalize_pkg::config::CONFIG_ENV;
use normalize_pkg::test_utils::{PackageFixture, TestProject};
use predicates::prelude::*;
use serde_json::json;

fn normalize_pkg(project: &TestProject) -> Command {
    let mut cmd = Command::cargo_bin("normalize-pkg").unwrap();
    cmd.current_dir(project.path()).env_remove(CONFIG_ENV).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_local_config_sets_dest_and_omit() {
    let project = TestProject::new("configured").unwrap();
    PackageFixture::minimal().write_to(project.path()).unwrap();
    project.write_config("dest = \"out.json\"\nomit = [\"keywords\"]\n").unwrap();

    normalize_pkg(&project).assert().success();

    let written = project.read_json("out.json").unwrap();
    assert_eq!(written, json!({"name": "minimal", "version": "0.1.0"}));
}

#[test]
fn test_known_only_reports_unknown_keys() {
    let project = TestProject::new("strict").unwrap();
    project.write_package(&json!({"name": "strict", "nmae": "typo"})).unwrap();
    project.write_config("known-only = true\n").unwrap();

    normalize_pkg(&project)
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown 'nmae'").and(predicate::str::contains("did you mean 'name'?")));

    assert!(project.read_json("package.json").unwrap().get("nmae").is_none());
}

#[test]
fn test_required_fields_warn_without_defaults() {
    let project = TestProject::new("bare").unwrap();
    project.write_package(&json!({"name": "bare"})).unwrap();
    project.write_config("defaults = false\nrequired = [\"version\", \"license\"]\n").unwrap();

    normalize_pkg(&project)
        .assert()
        .success()
        .stderr(predicate::str::contains("missing 'version'").and(predicate::str::contains("missing 'license'")));

    assert_eq!(project.read_json("package.json").unwrap(), json!({"name": "bare"}));
}

#[test]
fn test_env_var_names_config_file() {
    let project = TestProject::new("env-config").unwrap();
    PackageFixture::minimal().write_to(project.path()).unwrap();
    project.write_config("dest = \"ignored.json\"\n").unwrap();
    project.create_file("ci/normalize.toml", "dest = \"from-env.json\"\n").unwrap();

    normalize_pkg(&project).env(CONFIG_ENV, "ci/normalize.toml").assert().success();

    assert!(project.file_exists("from-env.json"));
    assert!(!project.file_exists("ignored.json"));
}

#[test]
fn test_env_var_missing_file_fails() {
    let project = TestProject::new("env-missing").unwrap();

    normalize_pkg(&project)
        .env(CONFIG_ENV, "nowhere.toml")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_invalid_config_fails() {
    let project = TestProject::new("bad-config").unwrap();
    project.write_config("omit = [").unwrap();

    normalize_pkg(&project)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config file"));
}
