//! The command-line adapter from the outside.

use normalize_pkg::args::normalize_argv;
use normalize_pkg::schema::{SchemaOptions, WarningKind};
use normalize_pkg::test_utils::TestProject;
use serde_json::json;

fn options(project: &TestProject) -> SchemaOptions {
    SchemaOptions::new().with_cwd(project.path())
}

#[test]
fn test_short_version_alias() {
    let project = TestProject::new("argv").unwrap();
    let result = normalize_argv(&["-V"], options(&project)).unwrap();

    assert_eq!(result.config["version"], json!(true));
    assert_eq!(result.config["V"], json!(true));
    assert!(!result.has_warnings());
}

#[test]
fn test_word_after_single_dash_is_not_an_alias() {
    let project = TestProject::new("argv").unwrap();
    let result = normalize_argv(&["-verbose"], options(&project)).unwrap();

    // parsed as a group of short flags, not rewritten to --verbose
    assert!(!result.config.contains_key("verbose"));
    assert_eq!(result.config["v"], json!(true));
}

#[test]
fn test_positional_tasks() {
    let project = TestProject::new("argv").unwrap();
    let result = normalize_argv(&["lint", "build", "lint"], options(&project)).unwrap();

    assert_eq!(result.config["tasks"], json!(["lint", "build"]));
    assert_eq!(result.config["t"], result.config["tasks"]);
}

#[test]
fn test_related_and_toc() {
    let project = TestProject::new("argv").unwrap();
    let result = normalize_argv(&["--related", "b,a", "--toc"], options(&project)).unwrap();

    assert_eq!(result.config["related"], json!({"list": ["a", "b"]}));
    assert_eq!(result.config["toc"], json!({"show": true}));
    assert_eq!(result.config["T"], result.config["toc"]);
}

#[test]
fn test_file_resolved_against_cwd_flag() {
    let project = TestProject::new("argv").unwrap();
    project.create_file("docs/README.md", "# hi").unwrap();
    let cwd = project.path().to_string_lossy().into_owned();

    let result = normalize_argv(&["--cwd", &cwd, "--file", "docs/README.md"], SchemaOptions::new()).unwrap();

    let expected = project.path().join("docs/README.md").to_string_lossy().into_owned();
    assert_eq!(result.config["file"], json!(expected));
}

#[test]
fn test_required_flag_missing() {
    let project = TestProject::new("argv").unwrap();
    let result = normalize_argv(&["--verbose"], options(&project).with_required(["file"])).unwrap();

    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].kind, WarningKind::Missing);
    assert_eq!(result.warnings[0].prop, "file");
}
