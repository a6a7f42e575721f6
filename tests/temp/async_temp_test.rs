/*!
 * Async Temp Tests
 * Future-returning API, concurrent allocation and completion ordering
 */

use futures::future::join_all;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use temp_tracker::{
    AsyncTemp, MemFS, ResourceRequest, TempConfig, TempError, TempManager,
};
use tokio::time::sleep;

fn setup() -> (TempDir, AsyncTemp) {
    let root = TempDir::new().unwrap();
    let manager = TempManager::builder()
        .with_config(TempConfig::new().with_root(root.path()))
        .build()
        .unwrap();
    (root, AsyncTemp::new(manager))
}

#[tokio::test]
async fn test_open_prefix_variants() {
    let (_root, temp) = setup();

    let by_string = temp.open("foobar213").await.unwrap();
    assert!(by_string.path.to_string_lossy().contains("foobar213"));

    let by_request = temp
        .open(ResourceRequest::new().prefix("foobar321"))
        .await
        .unwrap();
    assert!(by_request.path.to_string_lossy().contains("foobar321"));

    let by_suffix = temp.open(ResourceRequest::new().suffix("x")).await.unwrap();
    assert!(by_suffix.path.to_string_lossy().ends_with('x'));
}

#[tokio::test]
async fn test_mkdir_is_directory() {
    let (_root, temp) = setup();
    let path = temp.mkdir("foobar").await.unwrap();
    assert!(std::fs::symlink_metadata(&path).unwrap().is_dir());
}

#[tokio::test]
async fn test_track_open_cleanup() {
    let (_root, temp) = setup();
    temp.track(true);

    let handle = temp.open("a").await.unwrap();
    let report = temp.cleanup().await.unwrap();

    assert_eq!(report.removed, vec![handle.path.clone()]);
    assert!(!handle.path.exists());
    assert!(temp.cleanup().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cleanup_rejects_untracked() {
    let (_root, temp) = setup();
    temp.open("foobar").await.unwrap();

    let err = temp.cleanup().await.unwrap_err();
    assert_eq!(err, TempError::NoTrackingEnabled);
}

#[tokio::test]
async fn test_errors_pass_through_unchanged() {
    let (root, temp) = setup();
    let err = temp
        .mkdir(ResourceRequest::new().dir(root.path().join("nope")))
        .await
        .unwrap_err();

    match err {
        TempError::CreationFailed { path, .. } => assert!(path.starts_with(root.path().join("nope"))),
        e => panic!("unexpected error: {:?}", e),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_allocations_distinct() {
    let (_root, temp) = setup();
    temp.track(true);

    let request = ResourceRequest::new().prefix("same-").suffix(".tmp");
    let handles = join_all((0..64).map(|_| temp.open(request.clone()))).await;

    let paths: HashSet<PathBuf> = handles
        .into_iter()
        .map(|h| h.unwrap().path)
        .collect();
    assert_eq!(paths.len(), 64);
    assert_eq!(temp.tracked_paths().len(), 64);

    let report = temp.cleanup().await.unwrap();
    assert_eq!(report.files, 64);
    assert!(paths.iter().all(|p| !p.exists()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_open_and_cleanup_stay_consistent() {
    let fs = MemFS::new();
    let temp = AsyncTemp::new(
        TempManager::builder()
            .with_filesystem(Arc::new(fs.clone()))
            .with_config(TempConfig::tracked())
            .build()
            .unwrap(),
    );

    let opens = join_all((0..32).map(|_| temp.open("race")));
    let cleanup = temp.cleanup();
    let (handles, _) = tokio::join!(opens, cleanup);

    // Whatever the interleaving, a final cleanup leaves nothing behind
    temp.cleanup().await.unwrap();
    for handle in handles {
        let handle = handle.unwrap();
        assert!(!temp_tracker::FileSystem::exists(&fs, &handle.path));
    }
    assert!(temp.tracked_paths().is_empty());
}

async fn wait_for_tracked(temp: &AsyncTemp, count: usize) -> Vec<PathBuf> {
    let mut tracked = Vec::new();
    for _ in 0..100 {
        tracked = temp.tracked_paths();
        if tracked.len() >= count {
            break;
        }
        sleep(Duration::from_millis(10)).await;
    }
    tracked
}

#[tokio::test]
async fn test_dropped_future_still_tracks() {
    let (_root, temp) = setup();
    temp.track(true);

    // Poll once, then abandon it
    let pending = temp.open("abandoned");
    let _ = tokio::time::timeout(Duration::from_nanos(1), pending).await;

    let tracked = wait_for_tracked(&temp, 1).await;
    assert_eq!(tracked.len(), 1);
    assert!(tracked[0].exists());
    temp.cleanup().await.unwrap();
    assert!(!tracked[0].exists());
}

#[tokio::test]
async fn test_unpolled_future_still_allocates() {
    let (_root, temp) = setup();
    temp.track(true);

    drop(temp.open("never-polled"));
    drop(temp.mkdir("never-polled"));

    let tracked = wait_for_tracked(&temp, 2).await;
    assert_eq!(tracked.len(), 2);
    assert!(tracked.iter().all(|p| p.exists()));

    let report = temp.cleanup().await.unwrap();
    assert_eq!(report.files, 1);
    assert_eq!(report.dirs, 1);
}

#[tokio::test]
async fn test_relative_dir_is_kept_relative() {
    let scratch = tempfile::Builder::new()
        .prefix("relative-async-")
        .tempdir_in(".")
        .unwrap();
    let temp = AsyncTemp::default();
    temp.track(true);

    let path = temp
        .mkdir(ResourceRequest::new().dir(scratch.path()))
        .await
        .unwrap();

    assert!(path.is_relative());
    assert!(path.is_dir());
    temp.cleanup().await.unwrap();
    assert!(!path.exists());
}
