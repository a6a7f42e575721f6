/*!
 * Temp Manager Tests
 * Blocking allocation, tracking and cleanup against the host filesystem
 */

use pretty_assertions::assert_eq;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use temp_tracker::{
    MemFS, ResourceKind, ResourceRequest, TempConfig, TempError, TempManager, TrackingRegistry,
};

fn local_manager(root: &Path) -> TempManager {
    TempManager::builder()
        .with_config(TempConfig::new().with_root(root))
        .build()
        .unwrap()
}

#[test]
fn test_open_with_prefix_string() {
    let root = TempDir::new().unwrap();
    let manager = local_manager(root.path());

    let handle = manager.open("foobar213").unwrap();
    assert!(handle.path.to_string_lossy().contains("foobar213"));
    assert!(handle.path.starts_with(root.path()));
    assert_eq!(handle.kind, ResourceKind::File);
    assert!(handle.path.is_file());
}

#[test]
fn test_open_with_full_decoration() {
    let root = TempDir::new().unwrap();
    let dir = root.path().join("321foobar");
    std::fs::create_dir(&dir).unwrap();
    let manager = local_manager(root.path());

    let handle = manager
        .open(
            ResourceRequest::new()
                .prefix("foobar123")
                .suffix("foobar321")
                .dir(&dir),
        )
        .unwrap();

    let name = handle.path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(handle.path.starts_with(&dir));
    assert!(name.starts_with("foobar123"));
    assert!(name.ends_with("foobar321"));
}

#[test]
fn test_descriptor_is_usable() {
    let root = TempDir::new().unwrap();
    let manager = local_manager(root.path());

    let mut handle = manager.open(ResourceRequest::new().suffix(".txt")).unwrap();
    let mut fd = handle.take_descriptor().unwrap();
    fd.write_all(b"scratch").unwrap();
    fd.seek(SeekFrom::Start(0)).unwrap();
    let mut contents = String::new();
    fd.read_to_string(&mut contents).unwrap();

    assert_eq!(contents, "scratch");
    assert_eq!(std::fs::read(&handle.path).unwrap(), b"scratch");
}

#[test]
fn test_mkdir_creates_directory() {
    let root = TempDir::new().unwrap();
    let manager = local_manager(root.path());

    let path = manager.mkdir("foobar").unwrap();
    assert!(path.is_dir());
    assert!(path.file_name().unwrap().to_string_lossy().starts_with("foobar"));
}

#[test]
fn test_default_prefixes() {
    let root = TempDir::new().unwrap();
    let manager = local_manager(root.path());

    let file = manager.open(ResourceRequest::new()).unwrap();
    let dir = manager.mkdir(ResourceRequest::new()).unwrap();
    assert!(file.path.file_name().unwrap().to_string_lossy().starts_with("f-"));
    assert!(dir.file_name().unwrap().to_string_lossy().starts_with("d-"));
}

#[test]
fn test_path_creates_nothing() {
    let root = TempDir::new().unwrap();
    let manager = local_manager(root.path());
    manager.track(true);

    let path = manager.path("dry-run").unwrap();
    assert!(path.starts_with(root.path()));
    assert!(!path.exists());
    assert!(manager.tracked_paths().is_empty());
}

#[test]
fn test_cleanup_without_tracking_fails() {
    let root = TempDir::new().unwrap();
    let manager = local_manager(root.path());

    manager.open("foobar").unwrap();
    assert_eq!(manager.cleanup().unwrap_err(), TempError::NoTrackingEnabled);
}

#[test]
fn test_tracked_cleanup_removes_everything() {
    let root = TempDir::new().unwrap();
    let manager = local_manager(root.path());
    manager.track(true);

    let file = manager.open("a").unwrap();
    let dir = manager.mkdir("b").unwrap();
    std::fs::write(dir.join("nested.txt"), b"data").unwrap();
    drop(file.descriptor);

    let report = manager.cleanup().unwrap();
    assert_eq!(report.files, 1);
    assert_eq!(report.dirs, 1);
    assert!(!file.path.exists());
    assert!(!dir.exists());

    let again = manager.cleanup().unwrap();
    assert!(again.is_empty());
}

#[test]
fn test_disable_forgets_allocations() {
    let root = TempDir::new().unwrap();
    let manager = local_manager(root.path());
    manager.track(true);
    let handle = manager.open("kept").unwrap();

    manager.track(false);
    manager.track(true);

    let report = manager.cleanup().unwrap();
    assert!(report.is_empty());
    // Untracked resources are left alone
    assert!(handle.path.exists());
}

#[test]
fn test_untracked_allocations_not_adopted() {
    let root = TempDir::new().unwrap();
    let manager = local_manager(root.path());

    let before = manager.open("before").unwrap();
    manager.track(true);
    let after = manager.open("after").unwrap();

    assert_eq!(manager.tracked_paths(), vec![after.path.clone()]);
    manager.cleanup().unwrap();
    assert!(before.path.exists());
    assert!(!after.path.exists());
}

#[test]
fn test_externally_removed_path_is_absent() {
    let root = TempDir::new().unwrap();
    let manager = local_manager(root.path());
    manager.track(true);

    let handle = manager.open("gone").unwrap();
    std::fs::remove_file(&handle.path).unwrap();

    let report = manager.cleanup().unwrap();
    assert_eq!(report.already_absent, vec![handle.path.clone()]);
    assert!(report.removed.is_empty());
}

#[test]
fn test_missing_parent_is_creation_failure() {
    let root = TempDir::new().unwrap();
    let manager = local_manager(root.path());
    manager.track(true);

    let err = manager
        .open(ResourceRequest::new().dir(root.path().join("missing")))
        .unwrap_err();
    match err {
        TempError::CreationFailed { path, cause } => {
            assert!(path.starts_with(root.path().join("missing")));
            // Host error text survives alongside the operation context
            assert!(cause.contains("os error"), "cause was {:?}", cause);
        }
        e => panic!("unexpected error: {:?}", e),
    }
    assert!(manager.tracked_paths().is_empty());
}

#[test]
fn test_relative_dir_resolves_against_cwd() {
    let scratch = tempfile::Builder::new()
        .prefix("relative-")
        .tempdir_in(".")
        .unwrap();
    let relative = scratch.path().to_path_buf();
    assert!(relative.is_relative());

    let manager = TempManager::new();
    manager.track(true);
    let handle = manager
        .open(ResourceRequest::new().dir(&relative))
        .unwrap();

    assert!(handle.path.starts_with(&relative));
    assert!(handle.path.is_file());
    assert_eq!(manager.cleanup().unwrap().removed, vec![handle.path.clone()]);
    assert!(!handle.path.exists());
}

#[test]
fn test_clones_share_tracking() {
    let root = TempDir::new().unwrap();
    let manager = local_manager(root.path());
    let other = manager.clone();

    manager.track(true);
    let handle = other.open("shared").unwrap();
    assert!(manager.tracked_paths().contains(&handle.path));
}

#[test]
fn test_partial_failure_retry() {
    let fs = MemFS::new();
    let registry = Arc::new(TrackingRegistry::enabled());
    let manager = TempManager::builder()
        .with_filesystem(Arc::new(fs.clone()))
        .with_registry(Arc::clone(&registry))
        .build()
        .unwrap();

    let stuck = manager.mkdir("stuck").unwrap();
    let loose = manager.open("loose").unwrap();
    fs.deny_removal(&stuck);

    match manager.cleanup().unwrap_err() {
        TempError::PartialCleanupFailure { succeeded, failed } => {
            assert_eq!(succeeded, vec![loose.path.clone()]);
            assert_eq!(failed.len(), 1);
            assert_eq!(failed[0].path, stuck);
        }
        e => panic!("unexpected error: {:?}", e),
    }
    assert_eq!(registry.snapshot(), vec![stuck.clone()]);

    fs.allow_removal(&stuck);
    let report = manager.cleanup().unwrap();
    assert_eq!(report.removed, vec![stuck]);
    assert_eq!(report.dirs, 1);
}

#[test]
fn test_exhausted_retries_with_degenerate_tokens() {
    let fs = MemFS::new();
    let manager = TempManager::builder()
        .with_filesystem(Arc::new(fs.clone()))
        .with_config(TempConfig::tracked().with_max_attempts(3))
        .with_token_source(Arc::new(|| "constant".to_string()))
        .build()
        .unwrap();

    manager.open(ResourceRequest::new()).unwrap();
    let err = manager.open(ResourceRequest::new()).unwrap_err();

    assert_eq!(err, TempError::ExhaustedRetries { attempts: 3 });
    assert_eq!(manager.tracked_paths().len(), 1);
}

#[test]
fn test_invalid_request() {
    let root = TempDir::new().unwrap();
    let manager = local_manager(root.path());

    assert!(matches!(
        manager.open(ResourceRequest::new().suffix("/etc")),
        Err(TempError::InvalidRequest(_))
    ));
    assert!(matches!(
        manager.mkdir(ResourceRequest::new().dir("")),
        Err(TempError::InvalidRequest(_))
    ));
}
