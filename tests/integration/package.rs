//! `package.json` normalization and custom schemas through the public API.

use normalize_pkg::pkg::{KEY_ORDER, normalize_package, package_schema, read_package, write_package};
use normalize_pkg::schema::{Config, Field, Patch, Schema, SchemaOptions, WarningKind};
use normalize_pkg::test_utils::{PackageFixture, TestProject};
use serde_json::{Value, json};

#[test]
fn test_messy_fixture_has_no_warnings() {
    let project = TestProject::new("messy").unwrap();
    let result =
        normalize_package(PackageFixture::messy().content, project.path(), SchemaOptions::default()).unwrap();

    assert!(!result.has_warnings(), "unexpected warnings: {:?}", result.warnings);
    assert_eq!(result.config["version"], json!("1.2.3"));
    assert_eq!(result.config["files"], json!(["index.js"]));
}

#[test]
fn test_output_keys_follow_key_order() {
    let project = TestProject::new("messy").unwrap();
    let result =
        normalize_package(PackageFixture::messy().content, project.path(), SchemaOptions::default()).unwrap();

    let positions: Vec<usize> = result
        .config
        .keys()
        .map(|key| KEY_ORDER.iter().position(|k| k == key).unwrap())
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[test]
fn test_invalid_version_is_dropped_with_warning() {
    let project = TestProject::new("badver").unwrap();
    let result = normalize_package(
        json!({"name": "badver", "version": "one point oh"}),
        project.path(),
        SchemaOptions::default(),
    )
    .unwrap();

    assert!(result.config.get("version").is_none());
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].kind, WarningKind::InvalidValue);
    assert_eq!(result.warnings[0].prop, "version");
}

#[test]
fn test_wrong_type_is_dropped_with_warning() {
    let project = TestProject::new("badtype").unwrap();
    let result =
        normalize_package(json!({"name": "badtype", "main": 42}), project.path(), SchemaOptions::default())
            .unwrap();

    assert!(result.config.get("main").is_none());
    assert_eq!(result.warnings[0].kind, WarningKind::InvalidType);
}

#[test]
fn test_schema_normalize_is_idempotent_in_memory() {
    let project = TestProject::new("again").unwrap();
    let schema = package_schema(project.path(), SchemaOptions::default()).unwrap();

    let first = schema.normalize_value(PackageFixture::messy().content).unwrap();
    let second = schema.normalize(first.config.clone()).unwrap();

    assert_eq!(second.config, first.config);
    assert!(second.warnings.is_empty());
}

#[test]
fn test_read_write_round_trip_on_disk() {
    let project = TestProject::new("disk").unwrap();
    PackageFixture::messy().write_to(project.path()).unwrap();

    let manifest = read_package(&project.path().join("package.json")).unwrap();
    let result = normalize_package(manifest, project.path(), SchemaOptions::default()).unwrap();
    let dest = project.path().join("normalized.json");
    write_package(&dest, &result.config.to_value()).unwrap();

    assert_eq!(project.read_json("normalized.json").unwrap(), result.into_value());
}

#[test]
fn test_custom_schema_with_dependencies() {
    let mut builder = Schema::builder();
    builder
        .register(Field::new("greeting", "string").unwrap().depends_on(["name"]).normalize(|value, ctx| {
            let name = ctx.get_str("name").unwrap_or("world");
            Ok(Patch::set(Value::String(format!("{} {name}", value.as_str().unwrap_or("hello")))))
        }))
        .register(Field::new("name", "string").unwrap().with_default(json!("jon")));
    let schema = builder.build().unwrap();

    assert_eq!(schema.processing_order().collect::<Vec<_>>(), vec!["name", "greeting"]);

    let result = schema.normalize_value(json!({"greeting": "hi"})).unwrap();
    assert_eq!(result.config["greeting"], json!("hi jon"));

    let mut config = Config::from_value(json!({"greeting": "hey", "name": "brian"})).unwrap();
    let warnings = schema.update("greeting", &mut config).unwrap();
    assert!(warnings.is_empty());
    assert_eq!(config["greeting"], json!("hey brian"));
}

#[test]
fn test_cycle_is_rejected_at_build() {
    let mut builder = Schema::builder();
    builder
        .register(Field::new("a", "string").unwrap().depends_on(["b"]))
        .register(Field::new("b", "string").unwrap().depends_on(["a"]));
    assert!(builder.build().is_err());
}
