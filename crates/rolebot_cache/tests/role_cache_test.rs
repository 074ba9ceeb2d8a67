//! Tests for the external-backed role cache.

use async_trait::async_trait;
use rolebot_cache::{ExternalRoleCache, RoleCacheConfig};
use rolebot_core::{CreateRoleRequest, ExternalRole, NewExternalRole, NewRole, Role};
use rolebot_database::InMemoryRoleRepository;
use rolebot_error::{
    CacheErrorKind, DatabaseError, DatabaseErrorKind, ExternalErrorKind, RolebotErrorKind,
    RolebotResult,
};
use rolebot_interface::{ExternalRoleSource, RoleRepository};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{Barrier, Mutex};

/// External source double that counts calls.
#[derive(Default)]
struct FakeSource {
    roles: Mutex<HashMap<String, ExternalRole>>,
    create_calls: AtomicUsize,
    get_calls: AtomicUsize,
    get_barrier: Option<Barrier>,
    delay: Option<Duration>,
}

impl FakeSource {
    fn with_role(external_id: &str, name: &str) -> Self {
        let source = Self::default();
        source.roles.try_lock().unwrap().insert(
            external_id.to_string(),
            ExternalRole {
                external_id: external_id.to_string(),
                name: name.to_string(),
            },
        );
        source
    }

    fn creates(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    fn gets(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExternalRoleSource for FakeSource {
    async fn create(&self, new_role: &NewExternalRole) -> RolebotResult<ExternalRole> {
        let n = self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let role = ExternalRole {
            external_id: format!("ext-{}", 1000 + n),
            name: new_role.name.to_lowercase(),
        };
        self.roles
            .lock()
            .await
            .insert(role.external_id.clone(), role.clone());
        Ok(role)
    }

    async fn get_by_external_id(&self, external_id: &str) -> RolebotResult<Option<ExternalRole>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(barrier) = &self.get_barrier {
            barrier.wait().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.roles.lock().await.get(external_id).cloned())
    }
}

/// Repository whose writes always fail.
struct BrokenRepository;

#[async_trait]
impl RoleRepository for BrokenRepository {
    async fn create(&self, _new_role: &NewRole) -> RolebotResult<Role> {
        Err(
            DatabaseError::new(DatabaseErrorKind::Connection("connection reset".to_string()))
                .into(),
        )
    }

    async fn get_by_external_id(&self, _external_id: &str) -> RolebotResult<Option<Role>> {
        Ok(None)
    }
}

fn cache_with(
    repo: Arc<InMemoryRoleRepository>,
    source: Arc<FakeSource>,
) -> ExternalRoleCache {
    ExternalRoleCache::new(repo, source, RoleCacheConfig::default())
}

#[tokio::test]
async fn test_miss_then_found_persists_role() {
    let repo = Arc::new(InMemoryRoleRepository::new());
    let source = Arc::new(FakeSource::with_role("X1", "Admin"));
    let cache = cache_with(repo.clone(), source.clone());

    let role = cache.get_by_external_id("X1").await.unwrap().unwrap();

    assert_eq!(role.external_id, "X1");
    assert_eq!(role.name, "Admin");
    assert_eq!(repo.roles().await, vec![role]);
    assert_eq!(source.gets(), 1);
}

#[tokio::test]
async fn test_hit_skips_external_source() {
    let repo = Arc::new(InMemoryRoleRepository::new());
    let source = Arc::new(FakeSource::with_role("X1", "Admin"));
    let cache = cache_with(repo, source.clone());

    let first = cache.get_by_external_id("X1").await.unwrap();
    let second = cache.get_by_external_id("X1").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(source.gets(), 1);
}

#[tokio::test]
async fn test_miss_then_absent_returns_none() {
    let repo = Arc::new(InMemoryRoleRepository::new());
    let source = Arc::new(FakeSource::default());
    let cache = cache_with(repo.clone(), source.clone());

    let role = cache.get_by_external_id("X2").await.unwrap();

    assert!(role.is_none());
    assert!(repo.is_empty().await);
    assert_eq!(source.gets(), 1);
}

#[tokio::test]
async fn test_create_uses_externally_issued_id_and_name() {
    let repo = Arc::new(InMemoryRoleRepository::new());
    let source = Arc::new(FakeSource::default());
    let cache = cache_with(repo.clone(), source.clone());

    let role = cache.create(&CreateRoleRequest::new("Admins")).await.unwrap();

    assert_eq!(role.external_id, "ext-1000");
    assert_eq!(role.name, "admins");
    assert_eq!(
        repo.get_by_external_id("ext-1000").await.unwrap(),
        Some(role)
    );

    // The new role is now a hit.
    cache.get_by_external_id("ext-1000").await.unwrap();
    assert_eq!(source.gets(), 0);
}

#[tokio::test]
async fn test_create_rejects_caller_chosen_external_id() {
    let repo = Arc::new(InMemoryRoleRepository::new());
    let source = Arc::new(FakeSource::default());
    let cache = cache_with(repo.clone(), source.clone());

    let request = CreateRoleRequest::builder()
        .name("Admins")
        .external_id("123")
        .build()
        .unwrap();
    let err = cache.create(&request).await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(source.creates(), 0);
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_create_rejects_blank_name() {
    let source = Arc::new(FakeSource::default());
    let cache = cache_with(Arc::new(InMemoryRoleRepository::new()), source.clone());

    let err = cache.create(&CreateRoleRequest::new("   ")).await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(source.creates(), 0);
}

#[tokio::test]
async fn test_create_reports_orphan_when_persist_fails() {
    let source = Arc::new(FakeSource::default());
    let cache = ExternalRoleCache::new(
        Arc::new(BrokenRepository),
        source.clone(),
        RoleCacheConfig::default(),
    );

    let err = cache.create(&CreateRoleRequest::new("Admins")).await.unwrap_err();

    match err.kind() {
        RolebotErrorKind::Cache(cache_err) => match &cache_err.kind {
            CacheErrorKind::Orphaned {
                external_id, name, ..
            } => {
                assert_eq!(external_id, "ext-1000");
                assert_eq!(name, "admins");
            }
        },
        other => panic!("expected orphan, got {other}"),
    }
    assert_eq!(source.creates(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_external_timeout_is_retryable() {
    let repo = Arc::new(InMemoryRoleRepository::new());
    let source = Arc::new(FakeSource {
        delay: Some(Duration::from_secs(60)),
        ..FakeSource::default()
    });
    let cache = cache_with(repo.clone(), source);

    let err = cache
        .get_by_external_id_within("X1", Duration::from_millis(50))
        .await
        .unwrap_err();

    assert!(err.is_retryable());
    match err.kind() {
        RolebotErrorKind::External(e) => {
            assert!(matches!(e.kind, ExternalErrorKind::Timeout { after_ms: 50, .. }))
        }
        other => panic!("expected timeout, got {other}"),
    }
    assert!(repo.is_empty().await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_misses_store_one_row() {
    let repo = Arc::new(InMemoryRoleRepository::new());
    let source = Arc::new(FakeSource {
        get_barrier: Some(Barrier::new(2)),
        ..FakeSource::with_role("X3", "Raiders")
    });
    let cache = cache_with(repo.clone(), source.clone());

    let (a, b) = tokio::join!(
        tokio::spawn({
            let cache = cache.clone();
            async move { cache.get_by_external_id("X3").await }
        }),
        tokio::spawn({
            let cache = cache.clone();
            async move { cache.get_by_external_id("X3").await }
        }),
    );
    let a = a.unwrap().unwrap().unwrap();
    let b = b.unwrap().unwrap().unwrap();

    assert_eq!(a, b);
    assert_eq!(repo.len().await, 1);
    assert_eq!(source.gets(), 2);
}
