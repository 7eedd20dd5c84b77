//! Project file lifecycle: create, load, tamper, destroy

use super::test_utils::site;
use coderman::error::ApiError;
use coderman::project::{project_path, ProjectConfig, PROJECT_CONFIG_VERSION};
use coderman::tracker::{tracker_path, ChangeTracker};
use std::fs;

#[test]
fn test_project_file_is_sorted_pretty_json() {
    let dir = site(&[]);
    ProjectConfig::create(dir.path(), "abc123", "my-site", false).unwrap();

    let raw = fs::read_to_string(project_path(dir.path())).unwrap();
    let api_key = raw.find("\"api_key\"").unwrap();
    let name = raw.find("\"project_name\"").unwrap();
    let version = raw.find("\"version\"").unwrap();
    assert!(api_key < name && name < version);
    assert!(raw.contains('\n'));

    let loaded = ProjectConfig::load(dir.path()).unwrap();
    assert_eq!(loaded.version, PROJECT_CONFIG_VERSION);
    assert_eq!(loaded.project_name, "my-site");
}

#[test]
fn test_create_refuses_overwrite_without_force() {
    let dir = site(&[]);
    ProjectConfig::create(dir.path(), "k1", "one", false).unwrap();

    let err = ProjectConfig::create(dir.path(), "k2", "two", false).unwrap_err();
    assert!(matches!(err, ApiError::AlreadyInitialized(_)));
    assert_eq!(ProjectConfig::load(dir.path()).unwrap().project_name, "one");

    ProjectConfig::create(dir.path(), "k2", "two", true).unwrap();
    assert_eq!(ProjectConfig::load(dir.path()).unwrap().project_name, "two");
}

#[test]
fn test_missing_project_is_not_initialized() {
    let dir = site(&[]);
    let err = ProjectConfig::load(dir.path()).unwrap_err();
    assert!(matches!(err, ApiError::ProjectNotInitialized(_)));
}

#[test]
fn test_tampered_project_is_corrupt_and_kept() {
    let dir = site(&[]);
    fs::write(project_path(dir.path()), "{\"api_key\": ").unwrap();

    let err = ProjectConfig::load(dir.path()).unwrap_err();
    assert!(matches!(err, ApiError::CorruptState { .. }));
    assert!(err.to_string().contains("re-initialize"));
    assert!(project_path(dir.path()).exists());
}

#[test]
fn test_destroy_wrong_name_leaves_file() {
    let dir = site(&[]);
    ProjectConfig::create(dir.path(), "k", "real-name", false).unwrap();

    let err = ProjectConfig::destroy(dir.path(), "other-name").unwrap_err();
    assert!(matches!(err, ApiError::ConfirmationMismatch(_)));
    assert!(project_path(dir.path()).exists());
}

#[test]
fn test_destroy_keeps_tracker() {
    let dir = site(&[("index.html", "<p/>")]);
    ProjectConfig::create(dir.path(), "k", "real-name", false).unwrap();
    ChangeTracker::new(dir.path().to_path_buf())
        .track_changes()
        .unwrap();

    ProjectConfig::destroy(dir.path(), "real-name").unwrap();
    assert!(!project_path(dir.path()).exists());
    assert!(tracker_path(dir.path()).exists());
}
