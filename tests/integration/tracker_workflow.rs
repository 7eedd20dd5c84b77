//! End-to-end change tracking against real directories

use super::test_utils::{site, write_file};
use chrono::Utc;
use coderman::tracker::ChangeTracker;
use coderman::types::SyncStatus;
use std::collections::BTreeSet;
use std::fs;

fn set(paths: &[&str]) -> BTreeSet<String> {
    paths.iter().map(|p| p.to_string()).collect()
}

fn deployed_tracker(files: &[(&str, &str)]) -> (tempfile::TempDir, ChangeTracker) {
    let dir = site(files);
    let tracker = ChangeTracker::new(dir.path().to_path_buf());
    tracker.track_changes().unwrap();
    tracker.mark_deployed(Utc::now()).unwrap();
    (dir, tracker)
}

#[test]
fn test_added_stylesheet_is_reported() {
    let (dir, tracker) = deployed_tracker(&[("a.html", "<p>a</p>")]);
    write_file(dir.path(), "b.css", "p { margin: 0 }");

    let record = tracker.track_changes().unwrap();
    assert_eq!(record.files_added, set(&["b.css"]));
    assert!(record.files_deleted.is_empty());
    assert!(record.files_changed.is_empty());
    assert_eq!(record.status, SyncStatus::NotSynced);
    assert_ne!(record.current.master_hash, record.deployed.master_hash);
}

#[test]
fn test_removed_stylesheet_is_reported() {
    let (dir, tracker) = deployed_tracker(&[("a.html", "<p>a</p>"), ("b.css", "p {}")]);
    fs::remove_file(dir.path().join("b.css")).unwrap();

    let record = tracker.track_changes().unwrap();
    assert_eq!(record.files_deleted, set(&["b.css"]));
    assert!(record.files_added.is_empty());
    assert_eq!(record.status, SyncStatus::NotSynced);
}

#[test]
fn test_one_byte_edit_flags_exactly_one_file() {
    let (dir, tracker) = deployed_tracker(&[
        ("index.html", "<h1>Hello</h1>"),
        ("css/site.css", "h1 { color: red }"),
        ("about/index.html", "<p>about</p>"),
    ]);
    let before = tracker.load().unwrap().unwrap();

    write_file(dir.path(), "css/site.css", "h1 { color: rad }");
    let record = tracker.track_changes().unwrap();

    assert_eq!(record.files_changed, set(&["css/site.css"]));
    assert!(record.files_added.is_empty());
    assert!(record.files_deleted.is_empty());
    assert_eq!(record.status, SyncStatus::NotSynced);
    assert_ne!(
        record.current.get("css/site.css"),
        before.current.get("css/site.css")
    );
    assert_ne!(record.current.master_hash, before.current.master_hash);
}

#[test]
fn test_unchanged_tree_stays_synced() {
    let (_dir, tracker) = deployed_tracker(&[("index.html", "x"), ("a.css", "y")]);
    let record = tracker.track_changes().unwrap();
    assert_eq!(record.status, SyncStatus::Synced);
    assert!(record.diff().is_empty());
    assert_eq!(record.file_addition_count, 0);
}

#[test]
fn test_untracked_and_ignored_files_do_not_matter() {
    let (dir, tracker) = deployed_tracker(&[("index.html", "x")]);
    write_file(dir.path(), "notes.txt", "todo");
    write_file(dir.path(), "script.js", "alert(1)");
    write_file(dir.path(), "node_modules/pkg/readme.html", "<p/>");
    write_file(dir.path(), ".git/info.html", "<p/>");

    let record = tracker.track_changes().unwrap();
    assert_eq!(record.status, SyncStatus::Synced);
}

#[test]
fn test_uppercase_extension_is_tracked() {
    let dir = site(&[("INDEX.HTML", "x"), ("Site.Css", "y")]);
    let record = ChangeTracker::new(dir.path().to_path_buf())
        .track_changes()
        .unwrap();
    assert_eq!(record.files_added, set(&["INDEX.HTML", "Site.Css"]));
}

#[test]
fn test_revert_after_edit_is_synced_again() {
    let (dir, tracker) = deployed_tracker(&[("index.html", "v1")]);
    write_file(dir.path(), "index.html", "v2");
    assert!(!tracker.track_changes().unwrap().is_synced());

    write_file(dir.path(), "index.html", "v1");
    assert!(tracker.track_changes().unwrap().is_synced());
}

#[test]
fn test_files_to_deploy_lists_changed_then_added() {
    let (dir, tracker) = deployed_tracker(&[("z.html", "1")]);
    write_file(dir.path(), "z.html", "2");
    write_file(dir.path(), "a.css", "new");

    let record = tracker.track_changes().unwrap();
    assert_eq!(record.files_to_deploy(), vec!["z.html", "a.css"]);
}

#[test]
fn test_decomposed_file_name_is_tracked_under_nfc_key() {
    let dir = site(&[("index.html", "<p/>")]);
    fs::write(dir.path().join("cafe\u{0301}.html"), "x").unwrap();

    let tracker = ChangeTracker::new(dir.path().to_path_buf());
    let record = tracker.track_changes().unwrap();
    assert_eq!(record.files_added, set(&["caf\u{e9}.html", "index.html"]));

    tracker.mark_deployed(Utc::now()).unwrap();
    assert!(tracker.track_changes().unwrap().is_up_to_date());
}

#[test]
fn test_rename_keeps_status_but_lists_both_paths() {
    let (dir, tracker) = deployed_tracker(&[("a.html", "same")]);
    fs::rename(dir.path().join("a.html"), dir.path().join("b.html")).unwrap();

    let record = tracker.track_changes().unwrap();
    assert_eq!(record.status, SyncStatus::Synced);
    assert_eq!(record.files_added, set(&["b.html"]));
    assert_eq!(record.files_deleted, set(&["a.html"]));
    assert!(!record.is_up_to_date());
}
