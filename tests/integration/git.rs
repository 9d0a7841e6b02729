//! `.git/config` lookups.
//!
//! The parsed configs live in a process-wide cache, so these tests run
//! serially.

use normalize_pkg::repo::{
    GitConfigScope, git_config, git_config_path, git_user_email, git_user_name, remote_origin_url,
    username,
};
use normalize_pkg::test_utils::TestProject;
use serde_json::json;
use serial_test::serial;
use std::sync::Arc;

#[test]
#[serial]
fn test_git_config_is_cached_per_file() {
    let project = TestProject::with_origin("cached", "https://github.com/jon/cached.git").unwrap();

    let first = git_config(GitConfigScope::Local, project.path()).unwrap();
    project.write_git_config("https://github.com/jon/changed.git").unwrap();
    let second = git_config(GitConfigScope::Local, project.path()).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.get("remote.origin", "url"), Some("https://github.com/jon/cached.git"));
}

#[test]
#[serial]
fn test_local_user_wins() {
    let project = TestProject::new("user").unwrap();
    project
        .create_file(".git/config", "[user]\n\tname = Brian Woodward\n\temail = brian@example.com\n")
        .unwrap();

    assert_eq!(
        git_config_path(GitConfigScope::Local, project.path()),
        Some(project.path().join(".git").join("config"))
    );
    assert_eq!(git_user_name(project.path()).as_deref(), Some("Brian Woodward"));
    assert_eq!(git_user_email(project.path()).as_deref(), Some("brian@example.com"));
}

#[test]
#[serial]
fn test_no_origin_without_local_repository() {
    let project = TestProject::new("no-git").unwrap();
    assert_eq!(remote_origin_url(project.path()), None);
}

#[test]
#[serial]
fn test_username_prefers_author() {
    let project = TestProject::new("author-user").unwrap();
    project.create_file(".git/config", "[user]\n\tname = doowb\n").unwrap();

    let config = json!({"author": {"name": "Jon", "url": "https://github.com/jonschlinkert"}});
    assert_eq!(username(&config, project.path()).as_deref(), Some("jonschlinkert"));
}

#[test]
#[serial]
fn test_username_from_git_user_name() {
    let project = TestProject::new("git-user").unwrap();
    project.create_file(".git/config", "[user]\n\tname = doowb\n").unwrap();

    let config = json!({"author": "Jon Schlinkert", "repository": "someone/else"});
    assert_eq!(username(&config, project.path()).as_deref(), Some("doowb"));
}

#[test]
#[serial]
fn test_username_falls_back_to_repository_owner() {
    let project = TestProject::new("owner").unwrap();
    project.create_file(".git/config", "[core]\n\tbare = false\n").unwrap();

    let config = json!({"repository": "https://github.com/jonschlinkert/owner"});
    let found = username(&config, project.path());
    // a global user.name on this machine outranks the repository owner
    match git_user_name(project.path()) {
        Some(name) => assert_eq!(found, Some(name)),
        None => assert_eq!(found.as_deref(), Some("jonschlinkert")),
    }
}
