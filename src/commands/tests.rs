// App flow tests: choose directory, random open, reopen from history

use super::*;
use std::path::{Path, PathBuf};
use rand::SeedableRng;
use tempfile::TempDir;

use crate::error::ReelPickError;
use crate::launcher::RecordingLauncher;

fn app_with(launcher: RecordingLauncher) -> App<RecordingLauncher, StdRng> {
    let store = HistoryStore::open_in_memory().unwrap();
    App::with_selector(store, Selector::with_rng(StdRng::seed_from_u64(99)), launcher)
}

fn tree() -> (TempDir, PathBuf, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let top = tmp.path().join("a.mp4");
    let nested = tmp.path().join("sub").join("b.mp4");
    std::fs::create_dir_all(nested.parent().unwrap()).unwrap();
    std::fs::write(&top, b"a").unwrap();
    std::fs::write(&nested, b"b").unwrap();
    (tmp, top, nested)
}

#[test]
fn test_open_random_records_then_launches() {
    let (tmp, top, _) = tree();
    let mut app = app_with(RecordingLauncher::new());

    let entry = app.open_random(0.0, Some(tmp.path())).unwrap();

    assert_eq!(entry.path, top.to_string_lossy());
    assert_eq!(entry.name, "a.mp4");
    assert_eq!(app.launcher().opened(), vec![top]);
    assert_eq!(app.history().most_recent().unwrap(), Some(entry));
}

#[test]
fn test_open_random_uses_remembered_directory() {
    let (tmp, _, nested) = tree();
    let mut app = app_with(RecordingLauncher::new());

    let stored = app.choose_directory(tmp.path()).unwrap();
    assert_eq!(app.current_directory().unwrap(), Some(stored.clone()));

    let entry = app.open_random(1.0, None).unwrap();
    let expected = stored.join("sub").join("b.mp4");
    assert_eq!(entry.path, expected.to_string_lossy());
    assert_eq!(app.launcher().opened().len(), 1);
    assert!(nested.exists());
}

#[test]
fn test_open_random_without_directory() {
    let mut app = app_with(RecordingLauncher::new());
    let err = app.open_random(0.5, None).unwrap_err();
    assert!(matches!(err, ReelPickError::NoDirectorySelected));
    assert!(app.launcher().opened().is_empty());
}

#[test]
fn test_empty_directory_records_nothing() {
    let tmp = TempDir::new().unwrap();
    let mut app = app_with(RecordingLauncher::new());

    let err = app.open_random(0.5, Some(tmp.path())).unwrap_err();
    assert!(matches!(err, ReelPickError::NoVideosFound(_)));
    assert_eq!(app.history().count().unwrap(), 0);
    assert!(app.launcher().opened().is_empty());
}

#[test]
fn test_launch_failure_keeps_history_row() {
    let (tmp, _, _) = tree();
    let mut app = app_with(RecordingLauncher::failing());

    let err = app.open_random(0.5, Some(tmp.path())).unwrap_err();
    assert!(matches!(err, ReelPickError::Launch(_)));
    assert_eq!(app.history().count().unwrap(), 1);
}

#[test]
fn test_pick_only_does_not_launch() {
    let (tmp, _, _) = tree();
    let mut app = app_with(RecordingLauncher::new());

    app.pick_only(0.5, Some(tmp.path())).unwrap();
    assert!(app.launcher().opened().is_empty());
    assert_eq!(app.history().count().unwrap(), 1);
}

#[test]
fn test_open_entry_does_not_record_again() {
    let (_tmp, top, _) = tree();
    let mut app = app_with(RecordingLauncher::new());
    app.history_mut().add_manually(&top).unwrap();

    app.open_entry(&top).unwrap();
    assert_eq!(app.launcher().opened(), vec![top.clone()]);
    assert_eq!(app.history().count().unwrap(), 1);

    let err = app.open_entry(Path::new("/not/in/history.mp4")).unwrap_err();
    assert!(matches!(err, ReelPickError::NotFound(_)));
}

#[test]
fn test_choose_directory_rejects_files_and_missing() {
    let (tmp, top, _) = tree();
    let app = app_with(RecordingLauncher::new());

    assert!(matches!(app.choose_directory(&top).unwrap_err(), ReelPickError::InvalidPath(_)));
    assert!(matches!(
        app.choose_directory(&tmp.path().join("missing")).unwrap_err(),
        ReelPickError::InvalidPath(_)
    ));
    assert_eq!(app.current_directory().unwrap(), None);
}

#[test]
fn test_open_random_launches_path_on_disk() {
    let (tmp, _, nested) = tree();
    let mut app = app_with(RecordingLauncher::new());

    let entry = app.open_random(1.0, Some(tmp.path())).unwrap();
    assert_eq!(app.launcher().opened(), vec![nested.clone()]);
    assert_eq!(PathBuf::from(&entry.path), nested);
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_pick_is_rejected_before_launch() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join(OsStr::from_bytes(b"clip\xff.mp4")), b"x").unwrap();
    let mut app = app_with(RecordingLauncher::new());

    let err = app.open_random(0.0, Some(tmp.path())).unwrap_err();
    assert!(matches!(err, ReelPickError::InvalidPath(_)));
    assert!(app.launcher().opened().is_empty());
    assert_eq!(app.history().count().unwrap(), 0);
}
