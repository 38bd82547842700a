use async_trait::async_trait;
use sculptor_sync::{
    DatasetHub, DatasetSnapshot, DatasetSyncEngine, PartitionedDataset, SyncConfig, SyncError,
    SyncResult, SyncStatus,
};
use sculptor_types::{Metadata, Platform};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

/// In-memory hub stub with controllable failure and latency.
#[derive(Default)]
struct MemoryHub {
    stored: Mutex<Option<DatasetSnapshot>>,
    fail_replace: AtomicBool,
    fail_fetch: AtomicBool,
    replace_calls: AtomicUsize,
    replace_delay: Option<Duration>,
}

impl MemoryHub {
    fn with_snapshot(snapshot: DatasetSnapshot) -> Self {
        Self {
            stored: Mutex::new(Some(snapshot)),
            ..Default::default()
        }
    }

    fn with_replace_delay(delay: Duration) -> Self {
        Self {
            replace_delay: Some(delay),
            ..Default::default()
        }
    }

    async fn stored(&self) -> Option<DatasetSnapshot> {
        self.stored.lock().await.clone()
    }
}

#[async_trait]
impl DatasetHub for MemoryHub {
    fn provider_name(&self) -> &'static str {
        "memory"
    }

    async fn fetch(&self, _repository: &str) -> SyncResult<Option<DatasetSnapshot>> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(SyncError::Network("fetch refused".into()));
        }
        Ok(self.stored.lock().await.clone())
    }

    async fn replace(&self, _repository: &str, snapshot: &DatasetSnapshot) -> SyncResult<()> {
        self.replace_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.replace_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_replace.load(Ordering::SeqCst) {
            return Err(SyncError::Remote {
                status: 500,
                message: "replace refused".into(),
            });
        }
        *self.stored.lock().await = Some(snapshot.clone());
        Ok(())
    }
}

fn configured() -> SyncConfig {
    SyncConfig {
        credential: Some("token".into()),
        repository: Some("acme/social-style".into()),
        ..Default::default()
    }
}

fn engine_with(hub: Arc<MemoryHub>, config: SyncConfig) -> DatasetSyncEngine {
    DatasetSyncEngine::new(hub, config)
}

async fn record(engine: &DatasetSyncEngine, platform: Platform, original: &str) {
    engine
        .record_transformation(platform, original, "transformed", &Metadata::new())
        .await;
}

// ── Initialization ───────────────────────────────────────────────

#[tokio::test]
async fn initialize_loads_existing_remote_dataset() {
    let mut source = PartitionedDataset::new();
    source
        .append_record(Platform::Twitter, "o", "t", &Metadata::new())
        .unwrap();
    let hub = Arc::new(MemoryHub::with_snapshot(source.snapshot()));

    let engine = DatasetSyncEngine::initialize(hub, configured()).await;
    assert_eq!(engine.real_row_count(Platform::Twitter).await, 1);
}

#[tokio::test]
async fn initialize_starts_empty_when_remote_missing() {
    let engine = DatasetSyncEngine::initialize(Arc::new(MemoryHub::default()), configured()).await;
    for platform in Platform::ALL {
        assert_eq!(engine.row_count(platform).await, 0);
    }
}

#[tokio::test]
async fn initialize_downgrades_load_failure_to_empty() {
    let hub = Arc::new(MemoryHub::default());
    hub.fail_fetch.store(true, Ordering::SeqCst);

    // A load failure must never fail the caller's flow.
    let engine = DatasetSyncEngine::initialize(hub, configured()).await;
    assert_eq!(engine.row_count(Platform::Twitter).await, 0);
    assert!(engine.status().await.is_idle());
}

#[tokio::test]
async fn initialize_without_repository_skips_fetch() {
    let hub = Arc::new(MemoryHub::default());
    hub.fail_fetch.store(true, Ordering::SeqCst);

    let engine = DatasetSyncEngine::initialize(hub, SyncConfig::default()).await;
    assert!(engine.status().await.is_idle());
}

// ── record_transformation ────────────────────────────────────────

#[tokio::test]
async fn record_transformation_mirrors_into_dataset() {
    let engine = engine_with(Arc::new(MemoryHub::default()), configured());
    record(&engine, Platform::Twitter, "hello").await;

    assert_eq!(engine.real_row_count(Platform::Twitter).await, 1);
    // Schema parity: the other partitions each get exactly one placeholder.
    assert_eq!(engine.row_count(Platform::LinkedIn).await, 1);
    assert_eq!(engine.real_row_count(Platform::LinkedIn).await, 0);
}

#[tokio::test]
async fn concurrent_records_same_platform_lose_nothing() {
    let engine = engine_with(Arc::new(MemoryHub::default()), configured());

    let mut handles = Vec::new();
    for i in 0..32 {
        let engine = engine.clone();
        handles.push(tokio::spawn(async move {
            record(&engine, Platform::Twitter, &format!("original {i}")).await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(engine.real_row_count(Platform::Twitter).await, 32);
}

#[tokio::test]
async fn concurrent_records_different_platforms_lose_nothing() {
    let engine = engine_with(Arc::new(MemoryHub::default()), configured());

    let mut handles = Vec::new();
    for i in 0..12 {
        let engine = engine.clone();
        let platform = Platform::ALL[i % 3];
        handles.push(tokio::spawn(async move {
            record(&engine, platform, "o").await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    for platform in Platform::ALL {
        assert_eq!(engine.real_row_count(platform).await, 4);
    }
}

// ── push: configuration ──────────────────────────────────────────

#[tokio::test]
async fn push_without_credential_fails_fast_and_stays_idle() {
    let config = SyncConfig {
        repository: Some("acme/social-style".into()),
        ..Default::default()
    };
    let engine = engine_with(Arc::new(MemoryHub::default()), config);

    let err = engine.push().await.unwrap_err();
    assert!(matches!(err, SyncError::Configuration("credential")));
    // The state machine was never entered.
    assert_eq!(engine.status().await, SyncStatus::Idle);
}

#[tokio::test]
async fn push_without_repository_fails_fast() {
    let config = SyncConfig {
        credential: Some("token".into()),
        ..Default::default()
    };
    let engine = engine_with(Arc::new(MemoryHub::default()), config);

    let err = engine.push().await.unwrap_err();
    assert!(matches!(err, SyncError::Configuration("repository")));
    assert_eq!(engine.status().await, SyncStatus::Idle);
}

// ── push: success & failure transitions ──────────────────────────

#[tokio::test]
async fn push_replaces_remote_with_snapshot() {
    let hub = Arc::new(MemoryHub::default());
    let engine = engine_with(hub.clone(), configured());
    record(&engine, Platform::Twitter, "hello").await;

    engine.push().await.unwrap();
    assert_eq!(engine.status().await, SyncStatus::Idle);

    let remote = hub.stored().await.unwrap();
    assert_eq!(remote, engine.snapshot().await);
}

#[tokio::test]
async fn consecutive_pushes_without_appends_are_idempotent() {
    let hub = Arc::new(MemoryHub::default());
    let engine = engine_with(hub.clone(), configured());
    record(&engine, Platform::Twitter, "hello").await;

    engine.push().await.unwrap();
    let first = hub.stored().await.unwrap();
    engine.push().await.unwrap();
    let second = hub.stored().await.unwrap();

    for platform in Platform::ALL {
        assert_eq!(first.row_count(platform), second.row_count(platform));
    }
}

#[tokio::test]
async fn failed_push_sets_failed_status_and_is_retryable() {
    let hub = Arc::new(MemoryHub::default());
    hub.fail_replace.store(true, Ordering::SeqCst);
    let engine = engine_with(hub.clone(), configured());
    record(&engine, Platform::Twitter, "hello").await;

    let err = engine.push().await.unwrap_err();
    assert!(matches!(err, SyncError::Remote { status: 500, .. }));
    let status = engine.status().await;
    assert!(status.last_error().unwrap().contains("replace refused"));

    // Failed is transient: the next trigger retries cleanly.
    hub.fail_replace.store(false, Ordering::SeqCst);
    engine.push().await.unwrap();
    assert_eq!(engine.status().await, SyncStatus::Idle);
}

#[tokio::test]
async fn push_timeout_fails_and_leaves_mirror_untouched() {
    let hub = Arc::new(MemoryHub::with_replace_delay(Duration::from_millis(500)));
    let config = SyncConfig {
        push_timeout: Duration::from_millis(50),
        ..configured()
    };
    let engine = engine_with(hub, config);
    record(&engine, Platform::Twitter, "hello").await;
    let before = engine.snapshot().await;

    let err = engine.push().await.unwrap_err();
    assert!(matches!(err, SyncError::Timeout));
    assert!(engine.status().await.last_error().is_some());
    assert_eq!(engine.snapshot().await, before);
}

// ── Background push ──────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn background_push_reaches_the_hub() {
    let hub = Arc::new(MemoryHub::default());
    let engine = engine_with(hub.clone(), configured());
    record(&engine, Platform::Instagram, "caption").await;

    engine.push_in_background();
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(engine.status().await, SyncStatus::Idle);
    let remote = hub.stored().await.unwrap();
    assert_eq!(remote, engine.snapshot().await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn background_push_burst_is_coalesced() {
    let hub = Arc::new(MemoryHub::with_replace_delay(Duration::from_millis(100)));
    let engine = engine_with(hub.clone(), configured());
    record(&engine, Platform::Twitter, "hello").await;

    engine.push_in_background();
    tokio::time::sleep(Duration::from_millis(20)).await; // first push is in flight
    for _ in 0..5 {
        engine.push_in_background();
    }
    tokio::time::sleep(Duration::from_millis(500)).await;

    // One in-flight push plus exactly one coalesced follow-up.
    assert_eq!(hub.replace_calls.load(Ordering::SeqCst), 2);
    assert_eq!(engine.status().await, SyncStatus::Idle);
    assert_eq!(hub.stored().await.unwrap(), engine.snapshot().await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn background_request_during_direct_push_runs_one_more_push() {
    let hub = Arc::new(MemoryHub::with_replace_delay(Duration::from_millis(200)));
    let engine = engine_with(hub.clone(), configured());
    record(&engine, Platform::Twitter, "first").await;

    let direct = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.push().await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await; // direct push is in flight

    record(&engine, Platform::Twitter, "second").await;
    engine.push_in_background();

    direct.await.unwrap().unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;

    // The mid-flight request triggers exactly one follow-up push, and the
    // second record reaches the hub.
    assert_eq!(hub.replace_calls.load(Ordering::SeqCst), 2);
    assert_eq!(engine.status().await, SyncStatus::Idle);
    let remote = hub.stored().await.unwrap();
    assert_eq!(remote.row_count(Platform::Twitter), 2);
    assert_eq!(remote, engine.snapshot().await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn background_push_without_config_sets_failed_without_erroring() {
    let engine = engine_with(Arc::new(MemoryHub::default()), SyncConfig::default());
    record(&engine, Platform::Twitter, "hello").await;

    engine.push_in_background();
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(engine.status().await.last_error().is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn auto_sync_records_trigger_background_push() {
    let hub = Arc::new(MemoryHub::default());
    let config = SyncConfig {
        auto_sync: true,
        ..configured()
    };
    let engine = engine_with(hub.clone(), config);

    record(&engine, Platform::Twitter, "hello").await;
    tokio::time::sleep(Duration::from_millis(300)).await;

    let remote = hub.stored().await.unwrap();
    assert_eq!(remote.row_count(Platform::Twitter), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn background_failure_never_reaches_the_caller() {
    let hub = Arc::new(MemoryHub::default());
    hub.fail_replace.store(true, Ordering::SeqCst);
    let config = SyncConfig {
        auto_sync: true,
        ..configured()
    };
    let engine = engine_with(hub, config);

    // The primary save path completes despite the failing hub.
    record(&engine, Platform::Twitter, "hello").await;
    assert_eq!(engine.real_row_count(Platform::Twitter).await, 1);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(engine.status().await.last_error().is_some());
}
