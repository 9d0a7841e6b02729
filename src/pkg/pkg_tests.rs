use super::*;
use crate::schema::WarningKind;
use serde_json::json;
use tempfile::TempDir;

fn project(name: &str) -> (TempDir, std::path::PathBuf) {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(name);
    fs::create_dir(&dir).unwrap();
    (temp, dir)
}

#[test]
fn test_empty_manifest_gets_defaults() {
    let (_temp, dir) = project("my-lib");
    let result = normalize_package(json!({}), &dir, SchemaOptions::default()).unwrap();

    assert_eq!(
        result.into_value(),
        json!({
            "name": "my-lib",
            "version": "0.1.0",
            "keywords": ["lib", "my"],
        })
    );
}

#[test]
fn test_bin_omitted_without_bin_dir_or_cli_js() {
    let (_temp, dir) = project("tool");
    let result = normalize_package(json!({"name": "tool"}), &dir, SchemaOptions::default()).unwrap();
    assert!(!result.config.contains_key("bin"));
}

#[test]
fn test_keys_follow_manifest_order() {
    let (_temp, dir) = project("ordered");
    let result = normalize_package(
        json!({
            "zzz": 1,
            "keywords": ["b"],
            "license": "MIT",
            "name": "ordered",
            "description": "An ordered package",
        }),
        &dir,
        SchemaOptions::default(),
    )
    .unwrap();

    let keys: Vec<_> = result.config.keys().cloned().collect();
    assert_eq!(keys, vec!["name", "description", "version", "license", "keywords", "zzz"]);
}

#[test]
fn test_full_manifest() {
    let (_temp, dir) = project("full");
    fs::write(dir.join("cli.js"), "").unwrap();

    let result = normalize_package(
        json!({
            "name": "full",
            "version": "1.0.0",
            "author": {"name": "Jon", "url": "https://github.com/jon"},
            "repository": {"type": "git", "url": "git+https://github.com/jon/full.git"},
            "licenses": [{"type": "MIT"}],
            "main": "./index.js",
            "files": ["lib"],
            "preferGlobal": true,
            "verb": {"related": "b,a", "plugin": "x"},
        }),
        &dir,
        SchemaOptions::default(),
    )
    .unwrap();

    let config = &result.config;
    assert!(result.warnings.is_empty());
    assert_eq!(config["author"], json!("Jon (https://github.com/jon)"));
    assert_eq!(config["repository"], json!("jon/full"));
    assert_eq!(config["homepage"], json!("https://github.com/jon/full"));
    assert_eq!(config["bugs"], json!({"url": "https://github.com/jon/full/issues"}));
    assert_eq!(config["license"], json!("MIT"));
    assert!(!config.contains_key("licenses"));
    assert_eq!(config["main"], json!("index.js"));
    assert_eq!(config["bin"], json!({"full": "cli.js"}));
    assert_eq!(config["files"], json!(["cli.js", "index.js", "lib"]));
    assert_eq!(config["preferGlobal"], json!(true));
    assert_eq!(config["verb"]["related"], json!({"list": ["a", "b"]}));
    assert_eq!(config["verb"]["plugins"], json!(["x"]));
}

#[test]
fn test_required_name_missing_with_defaults_off() {
    let (_temp, dir) = project("x");
    let options = SchemaOptions {
        defaults: false,
        ..SchemaOptions::default()
    }
    .with_required(["name"]);
    let result = normalize_package(json!({}), &dir, options).unwrap();

    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].kind, WarningKind::Missing);
    assert_eq!(result.warnings[0].prop, "name");
}

#[test]
fn test_normalizing_twice_is_stable() {
    let (_temp, dir) = project("stable");
    let first = normalize_package(json!({"keywords": "b,a"}), &dir, SchemaOptions::default()).unwrap();
    let second = normalize_package(first.clone().into_value(), &dir, SchemaOptions::default()).unwrap();
    assert_eq!(first.into_value(), second.into_value());
}

#[test]
fn test_non_object_manifest() {
    let (_temp, dir) = project("bad");
    assert!(matches!(
        normalize_package(json!("nope"), &dir, SchemaOptions::default()),
        Err(NormalizeError::NotAnObject { .. })
    ));
}

#[test]
fn test_read_missing_is_empty_object() {
    let temp = TempDir::new().unwrap();
    let value = read_package(&temp.path().join(PACKAGE_FILE)).unwrap();
    assert_eq!(value, json!({}));
}

#[test]
fn test_read_invalid_json() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(PACKAGE_FILE);
    fs::write(&path, "{ not json").unwrap();

    let err = read_package(&path).unwrap_err();
    assert!(err.downcast_ref::<NormalizeError>().is_some_and(|e| matches!(e, NormalizeError::ManifestParse { .. })));
}

#[test]
fn test_write_pretty_with_newline() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("out/package.json");
    write_package(&path, &json!({"name": "x", "files": ["a"]})).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "{\n  \"name\": \"x\",\n  \"files\": [\n    \"a\"\n  ]\n}\n");
    assert!(!temp.path().join("out/package.json.tmp").exists());
}

#[test]
fn test_repository_from_origin_ignores_inline_comment() {
    let (_temp, dir) = project("pkg");
    fs::create_dir(dir.join(".git")).unwrap();
    fs::write(
        dir.join(".git/config"),
        "[remote \"origin\"]\n\turl = git@github.com:jon/pkg.git ; mirror\n",
    )
    .unwrap();

    let result = normalize_package(json!({}), &dir, SchemaOptions::default()).unwrap();
    assert_eq!(result.config["repository"], json!("jon/pkg"));
    assert_eq!(result.config["homepage"], json!("https://github.com/jon/pkg"));
}
