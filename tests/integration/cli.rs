//! Tests for the `normalize-pkg` binary.

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
fn test_empty_directory_gets_manifest() {
    let project = TestProject::new("brand-new").unwrap();

    normalize_pkg(&project).assert().success().stdout(predicate::str::contains("package.json"));

    let written = project.read_json("package.json").unwrap();
    assert_eq!(written, json!({"name": "brand-new", "version": "0.1.0", "keywords": ["brand", "new"]}));
}

#[test]
fn test_messy_manifest_is_cleaned_up() {
    let project = TestProject::new("messy").unwrap();
    PackageFixture::messy().write_to(project.path()).unwrap();

    normalize_pkg(&project).assert().success().stderr(predicate::str::contains("warning").not());

    let written = project.read_json("package.json").unwrap();
    assert_eq!(
        written,
        json!({
            "name": "messy",
            "version": "1.2.3",
            "homepage": "https://github.com/jonschlinkert/messy",
            "author": "Jon Schlinkert <jon@example.com> (https://github.com/jonschlinkert)",
            "repository": "jonschlinkert/messy",
            "bugs": {"url": "https://github.com/jonschlinkert/messy/issues"},
            "license": "MIT",
            "files": ["index.js"],
            "main": "index.js",
            "engines": {"node": ">=18"},
            "keywords": ["config", "parser"],
            "private": false,
            "verb": {
                "toc": {"show": true},
                "related": {"list": ["braces", "micromatch"]},
                "plugins": ["gulp-format-md"],
            },
        })
    );
}

#[test]
fn test_output_is_pretty_with_trailing_newline() {
    let project = TestProject::new("pretty").unwrap();
    PackageFixture::minimal().write_to(project.path()).unwrap();

    normalize_pkg(&project).assert().success();

    let content = project.read_file("package.json").unwrap();
    assert!(content.starts_with("{\n  \"name\": \"minimal\",\n"));
    assert!(content.ends_with("}\n"));
}

#[test]
fn test_dest_flag() {
    let project = TestProject::new("dest").unwrap();
    PackageFixture::minimal().write_to(project.path()).unwrap();
    let original = project.read_file("package.json").unwrap();

    normalize_pkg(&project).args(["--dest", "build/package.json"]).assert().success();

    assert!(project.file_exists("build/package.json"));
    assert_eq!(project.read_file("package.json").unwrap(), original);

    normalize_pkg(&project).args(["-d", "short.json"]).assert().success();
    assert_eq!(project.read_json("short.json").unwrap()["name"], json!("minimal"));
}

#[test]
fn test_warnings_go_to_stderr_and_exit_zero() {
    let project = TestProject::new("bad-repo").unwrap();
    PackageFixture::bad_repository().write_to(project.path()).unwrap();

    normalize_pkg(&project)
        .assert()
        .success()
        .stderr(predicate::str::contains("invalidValue 'repository'"));

    assert_eq!(project.read_json("package.json").unwrap()["repository"], json!("not a repo"));
}

#[test]
fn test_invalid_json_exits_one() {
    let project = TestProject::new("broken").unwrap();
    project.create_file("package.json", "{ \"name\": ").unwrap();

    normalize_pkg(&project)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid JSON"));

    assert_eq!(project.read_file("package.json").unwrap(), "{ \"name\": ");
}

#[test]
fn test_non_object_manifest_exits_one() {
    let project = TestProject::new("listy").unwrap();
    project.create_file("package.json", "[]").unwrap();

    normalize_pkg(&project)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Expected a config object, found array"));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    let project = TestProject::new("usage").unwrap();
    normalize_pkg(&project).arg("--bogus").assert().failure().code(2);
    assert!(!project.file_exists("package.json"));
}

#[test]
fn test_repository_from_git_origin() {
    let project = TestProject::with_origin("from-git", "git@github.com:jon/from-git.git").unwrap();

    normalize_pkg(&project).assert().success();

    let written = project.read_json("package.json").unwrap();
    assert_eq!(written["repository"], json!("jon/from-git"));
    assert_eq!(written["homepage"], json!("https://github.com/jon/from-git"));
    assert_eq!(written["bugs"], json!({"url": "https://github.com/jon/from-git/issues"}));
}

#[test]
fn test_bin_directory_is_detected() {
    let project = TestProject::new("tooly").unwrap();
    project.write_package(&json!({"name": "tooly", "files": ["lib"], "preferGlobal": true})).unwrap();
    project.create_file("bin/tooly.js", "#!/usr/bin/env node\n").unwrap();

    normalize_pkg(&project).assert().success();

    let written = project.read_json("package.json").unwrap();
    assert_eq!(written["bin"], json!({"tooly": "bin/tooly.js"}));
    assert_eq!(written["files"], json!(["bin/tooly.js", "lib"]));
    assert_eq!(written["preferGlobal"], json!(true));
}

#[test]
fn test_prefer_global_dropped_without_bin() {
    let project = TestProject::new("lib-only").unwrap();
    project.write_package(&json!({"name": "lib-only", "preferGlobal": true})).unwrap();

    normalize_pkg(&project).assert().success();

    let written = project.read_json("package.json").unwrap();
    assert!(written.get("bin").is_none());
    assert!(written.get("preferGlobal").is_none());
}

#[test]
fn test_running_twice_is_stable() {
    let project = TestProject::new("twice").unwrap();
    PackageFixture::messy().write_to(project.path()).unwrap();

    normalize_pkg(&project).assert().success();
    let first = project.read_file("package.json").unwrap();
    normalize_pkg(&project).assert().success();
    assert_eq!(project.read_file("package.json").unwrap(), first);
}
