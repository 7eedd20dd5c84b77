//! Integration tests for configuration layering

use super::test_utils::{site, with_xdg_env, write_file};
use coderman::config::{ConfigLoader, WORKSPACE_CONFIG_FILE};
use coderman::error::ApiError;
use coderman::tracker::ChangeTracker;
use tempfile::TempDir;

#[test]
fn test_workspace_extensions_drive_the_tracker() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let dir = site(&[("index.html", "x"), ("logo.svg", "<svg/>")]);
        write_file(
            dir.path(),
            WORKSPACE_CONFIG_FILE,
            "[tracking]\nextensions = [\"html\", \"svg\"]\n",
        );

        let config = ConfigLoader::load(dir.path()).unwrap();
        let record = ChangeTracker::new(dir.path().to_path_buf())
            .with_walker_config(config.tracking.walker_config())
            .track_changes()
            .unwrap();
        assert!(record.current.contains("logo.svg"));
        assert_eq!(record.file_addition_count, 2);
    });
}

#[test]
fn test_extra_ignore_pattern() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let dir = site(&[("index.html", "x"), ("drafts/wip.html", "y")]);
        write_file(
            dir.path(),
            WORKSPACE_CONFIG_FILE,
            "[tracking]\nignore_patterns = [\".git\", \"drafts\"]\n",
        );

        let config = ConfigLoader::load(dir.path()).unwrap();
        let record = ChangeTracker::new(dir.path().to_path_buf())
            .with_walker_config(config.tracking.walker_config())
            .track_changes()
            .unwrap();
        assert!(!record.current.contains("drafts/wip.html"));
        assert_eq!(record.current.len(), 1);
    });
}

#[test]
fn test_global_config_from_xdg_home() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        write_file(
            &test_dir.path().join("config"),
            "coderman/config.toml",
            "[deploy]\nendpoint = \"https://deploy.example\"\nrequest_timeout_secs = 30\n",
        );
        let dir = site(&[]);

        let config = ConfigLoader::load(dir.path()).unwrap();
        assert_eq!(config.deploy.endpoint, "https://deploy.example");
        assert_eq!(config.deploy.request_timeout_secs, 30);
        assert_eq!(config.deploy.connect_timeout_secs, 10);
    });
}

#[test]
fn test_invalid_workspace_config_is_config_error() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let dir = site(&[]);
        write_file(
            dir.path(),
            WORKSPACE_CONFIG_FILE,
            "[tracking]\nextensions = []\n",
        );
        let err = ConfigLoader::load(dir.path()).unwrap_err();
        assert!(matches!(err, ApiError::ConfigError(_)));
    });
}

#[test]
fn test_malformed_toml_is_config_error() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let dir = site(&[]);
        write_file(dir.path(), WORKSPACE_CONFIG_FILE, "[deploy\nendpoint = ");
        assert!(matches!(
            ConfigLoader::load(dir.path()),
            Err(ApiError::ConfigError(_))
        ));
    });
}
