//! Deploy workflow against a recording deploy service

use super::test_utils::{site, write_file};
use coderman::deploy::{
    deploy, read_bundle, Bundle, BundlePackager, DeployOutcome, DeployService,
};
use coderman::error::ApiError;
use coderman::project::ProjectConfig;
use coderman::tracker::ChangeTracker;
use coderman::types::SyncStatus;
use std::cell::RefCell;
use std::fs;
use std::path::Path;

#[derive(Default)]
struct RecordingService {
    reject_key: bool,
    fail_upload: bool,
    key_checks: RefCell<Vec<String>>,
    bundles: RefCell<Vec<Bundle>>,
}

impl DeployService for RecordingService {
    fn verify_api_key(&self, api_key: &str) -> Result<bool, ApiError> {
        self.key_checks.borrow_mut().push(api_key.to_string());
        Ok(!self.reject_key)
    }

    fn upload(&self, _project: &ProjectConfig, bundle: &Path) -> Result<(), ApiError> {
        self.bundles.borrow_mut().push(read_bundle(bundle)?);
        if self.fail_upload {
            return Err(ApiError::DeployFailed("connection reset".to_string()));
        }
        Ok(())
    }
}

fn project() -> ProjectConfig {
    ProjectConfig::new("key-0001", "site").unwrap()
}

#[test]
fn test_second_deploy_ships_only_the_delta() {
    let dir = site(&[("index.html", "v1"), ("a.css", "a"), ("old.css", "o")]);
    let tracker = ChangeTracker::new(dir.path().to_path_buf());
    let service = RecordingService::default();

    deploy(&tracker, &project(), &BundlePackager::new(), &service).unwrap();
    assert_eq!(service.bundles.borrow()[0].files.len(), 3);

    write_file(dir.path(), "index.html", "v2");
    write_file(dir.path(), "new.css", "n");
    fs::remove_file(dir.path().join("old.css")).unwrap();

    let outcome = deploy(&tracker, &project(), &BundlePackager::new(), &service).unwrap();
    let bundle = service.bundles.borrow()[1].clone();
    let paths: Vec<&str> = bundle.files.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["index.html", "new.css"]);
    assert_eq!(bundle.deleted, vec!["old.css"]);
    assert_eq!(bundle.files[0].decode().unwrap(), b"v2");

    match outcome {
        DeployOutcome::Deployed {
            record,
            uploaded,
            deleted,
        } => {
            assert_eq!((uploaded, deleted), (2, 1));
            assert_eq!(record.status, SyncStatus::Synced);
            assert_eq!(bundle.master_hash, record.deployed.master_hash);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[test]
fn test_synced_project_never_contacts_service() {
    let dir = site(&[("index.html", "v1")]);
    let tracker = ChangeTracker::new(dir.path().to_path_buf());
    deploy(
        &tracker,
        &project(),
        &BundlePackager::new(),
        &RecordingService::default(),
    )
    .unwrap();

    let service = RecordingService::default();
    let outcome = deploy(&tracker, &project(), &BundlePackager::new(), &service).unwrap();
    assert!(matches!(outcome, DeployOutcome::AlreadySynced { .. }));
    assert!(service.key_checks.borrow().is_empty());
}

#[test]
fn test_rejected_key_leaves_deployed_untouched() {
    let dir = site(&[("index.html", "v1")]);
    let tracker = ChangeTracker::new(dir.path().to_path_buf());
    let service = RecordingService {
        reject_key: true,
        ..RecordingService::default()
    };

    let err = deploy(&tracker, &project(), &BundlePackager::new(), &service).unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));
    assert_eq!(service.key_checks.borrow().as_slice(), ["key-0001"]);

    let record = tracker.load().unwrap().unwrap();
    assert!(record.deployed.is_empty());
    assert!(record.deployed_at.is_none());
}

#[test]
fn test_failed_upload_can_be_retried() {
    let dir = site(&[("index.html", "v1")]);
    let tracker = ChangeTracker::new(dir.path().to_path_buf());
    let failing = RecordingService {
        fail_upload: true,
        ..RecordingService::default()
    };

    assert!(deploy(&tracker, &project(), &BundlePackager::new(), &failing).is_err());
    assert!(!tracker.load().unwrap().unwrap().is_synced());

    let outcome = deploy(
        &tracker,
        &project(),
        &BundlePackager::new(),
        &RecordingService::default(),
    )
    .unwrap();
    assert!(matches!(outcome, DeployOutcome::Deployed { uploaded: 1, .. }));
}

#[test]
fn test_renamed_file_is_uploaded_and_old_path_deleted() {
    let dir = site(&[("a.html", "same")]);
    let tracker = ChangeTracker::new(dir.path().to_path_buf());
    let service = RecordingService::default();
    deploy(&tracker, &project(), &BundlePackager::new(), &service).unwrap();

    fs::rename(dir.path().join("a.html"), dir.path().join("b.html")).unwrap();
    let outcome = deploy(&tracker, &project(), &BundlePackager::new(), &service).unwrap();
    assert!(matches!(
        outcome,
        DeployOutcome::Deployed {
            uploaded: 1,
            deleted: 1,
            ..
        }
    ));

    let bundle = service.bundles.borrow()[1].clone();
    assert_eq!(bundle.files[0].path, "b.html");
    assert_eq!(bundle.files[0].decode().unwrap(), b"same");
    assert_eq!(bundle.deleted, vec!["a.html"]);

    let record = tracker.track_changes().unwrap();
    assert!(record.deployed.contains("b.html"));
    assert!(!record.deployed.contains("a.html"));
}

#[test]
fn test_decomposed_file_name_is_packaged() {
    let dir = site(&[]);
    fs::write(dir.path().join("cafe\u{0301}.html"), "menu").unwrap();
    let tracker = ChangeTracker::new(dir.path().to_path_buf());
    let service = RecordingService::default();

    deploy(&tracker, &project(), &BundlePackager::new(), &service).unwrap();
    let bundle = service.bundles.borrow()[0].clone();
    assert_eq!(bundle.files[0].path, "caf\u{e9}.html");
    assert_eq!(bundle.files[0].decode().unwrap(), b"menu");
}
