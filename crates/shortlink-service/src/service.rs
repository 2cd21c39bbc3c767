use crate::config::ServiceConfig;
use crate::error::{LinkError, Result};
use crate::metrics::LinkMetrics;
use crate::shortener::LinkShortener;
use crate::validate::validate_url;
use async_trait::async_trait;
use shortlink_core::{CacheError, Link, LinkCache, LinkId, LinkRepository, StorageError};
use shortlink_generator::Generator;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info, trace, warn};

/// A concrete implementation of the [`LinkShortener`] trait.
///
/// This service wraps a [`LinkRepository`], a [`LinkCache`] and a
/// [`Generator`] to handle:
/// - URL validation, before any I/O
/// - Id generation, retrying with a fresh id when the repository reports
///   a collision
/// - Cache population on create and read, and invalidation on delete
///
/// The service holds no mutable state. Concurrent creates that draw the
/// same id are arbitrated by the repository's uniqueness constraint.
pub struct LinkService<R, C, G> {
    repository: Arc<R>,
    cache: Arc<C>,
    generator: Arc<G>,
    config: ServiceConfig,
}

impl<R, C, G> Clone for LinkService<R, C, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            cache: Arc::clone(&self.cache),
            generator: Arc::clone(&self.generator),
            config: self.config.clone(),
        }
    }
}

impl<R: LinkRepository, C: LinkCache, G: Generator> LinkService<R, C, G> {
    /// Creates a new `LinkService` with the default configuration.
    pub fn new(repository: R, cache: C, generator: G) -> Self {
        Self::with_config(repository, cache, generator, ServiceConfig::default())
    }

    pub fn with_config(repository: R, cache: C, generator: G, config: ServiceConfig) -> Self {
        Self {
            repository: Arc::new(repository),
            cache: Arc::new(cache),
            generator: Arc::new(generator),
            config,
        }
    }

    /// Returns a reference to the repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Returns a reference to the cache.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Runs a repository call under the configured deadline.
    async fn repository_call<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = std::result::Result<T, StorageError>>,
    ) -> Result<T> {
        let outcome = match self.config.operation_timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                warn!(operation, timeout = ?limit, "repository call timed out");
                LinkError::DeadlineExceeded(operation)
            })?,
            None => call.await,
        };
        outcome.map_err(LinkError::Store)
    }

    /// Runs a cache call under the configured deadline. Failures are logged
    /// and turned into `None`.
    async fn cache_call<T>(
        &self,
        operation: &'static str,
        id: &LinkId,
        call: impl Future<Output = std::result::Result<T, CacheError>>,
    ) -> Option<T> {
        let outcome = match self.config.operation_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(outcome) => outcome,
                Err(_) => Err(CacheError::Timeout(format!(
                    "{operation} exceeded {limit:?}"
                ))),
            },
            None => call.await,
        };

        match outcome {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(operation, id = %id, error = %e, "cache call failed, continuing without cache");
                LinkMetrics::cache_error(operation);
                None
            }
        }
    }

    fn max_attempts(&self) -> usize {
        self.config.max_attempts.max(1)
    }
}

/// Splits caller-supplied ids into "reject", "cannot exist" and "usable".
///
/// Malformed ids are never produced by the generator, so no link can carry
/// one; lookups and deletes of such ids resolve to "absent" without I/O.
fn parse_id(raw: &str) -> Result<Option<LinkId>> {
    if raw.is_empty() {
        return Err(LinkError::invalid("id is required"));
    }
    match LinkId::new(raw) {
        Ok(id) => Ok(Some(id)),
        Err(e) => {
            debug!(id = raw, error = %e, "malformed id cannot exist");
            Ok(None)
        }
    }
}

#[async_trait]
impl<R: LinkRepository, C: LinkCache, G: Generator> LinkShortener for LinkService<R, C, G> {
    async fn create_link(&self, original_url: &str) -> Result<Link> {
        validate_url(original_url)?;

        let max_attempts = self.max_attempts();
        for attempt in 1..=max_attempts {
            let id = self.generator.generate().map_err(|e| {
                error!(error = %e, "id generator failed");
                LinkMetrics::create_failed("generator");
                LinkError::Internal(e.to_string())
            })?;
            let link = Link::new(id, original_url);
            LinkMetrics::create_attempt();

            let stored = self
                .repository_call("create", self.repository.create(&link))
                .await;
            match stored {
                Ok(()) => {
                    info!(id = %link.id, attempt, "created link");
                    LinkMetrics::link_created();
                    self.cache_call("set", &link.id, self.cache.set_link(&link.id, &link))
                        .await;
                    return Ok(link);
                }
                Err(LinkError::Store(ref e)) if e.is_conflict() => {
                    warn!(id = %link.id, attempt, max_attempts, "link id collision, retrying");
                    LinkMetrics::create_collision();
                }
                Err(e) => {
                    error!(id = %link.id, attempt, error = %e, "failed to store link");
                    LinkMetrics::create_failed("store");
                    return Err(e);
                }
            }
        }

        error!(max_attempts, "no unique link id after exhausting all attempts");
        LinkMetrics::create_failed("exhausted");
        Err(LinkError::CreateFailed)
    }

    async fn get_link(&self, id: &str) -> Result<Option<Link>> {
        let Some(id) = parse_id(id)? else {
            return Ok(None);
        };

        if let Some(Some(link)) = self
            .cache_call("get", &id, self.cache.get_link(&id))
            .await
        {
            trace!(id = %id, "served link from cache");
            LinkMetrics::cache_lookup(true);
            return Ok(Some(link));
        }
        LinkMetrics::cache_lookup(false);

        let Some(link) = self.repository_call("get", self.repository.get(&id)).await? else {
            return Ok(None);
        };
        self.cache_call("set", &id, self.cache.set_link(&id, &link))
            .await;

        // A delete that landed between the read and the fill has already
        // invalidated the cache, so the entry just written would outlive it.
        match self.repository_call("get", self.repository.get(&id)).await {
            Ok(Some(_)) => Ok(Some(link)),
            Ok(None) => {
                debug!(id = %id, "link deleted during read-through, dropping cache entry");
                self.cache_call("del", &id, self.cache.del(&id)).await;
                LinkMetrics::cache_stale_eviction();
                Ok(None)
            }
            Err(e) => {
                warn!(id = %id, error = %e, "could not confirm cached link, dropping cache entry");
                self.cache_call("del", &id, self.cache.del(&id)).await;
                Ok(Some(link))
            }
        }
    }

    async fn get_all_links(&self) -> Result<Vec<Link>> {
        let links = self
            .repository_call("get_all", self.repository.get_all())
            .await
            .inspect_err(|e| error!(error = %e, "failed to list links"))?;
        debug!(count = links.len(), "listed links");
        Ok(links)
    }

    async fn delete_link(&self, id: &str) -> Result<()> {
        let Some(id) = parse_id(id)? else {
            return Ok(());
        };

        let deleted = self
            .repository_call("delete", self.repository.delete(&id))
            .await;

        // Invalidate even when the repository call failed: it may have
        // been applied before the error surfaced.
        self.cache_call("del", &id, self.cache.del(&id)).await;

        match deleted {
            Ok(true) => {
                info!(id = %id, "deleted link");
                LinkMetrics::link_deleted();
            }
            Ok(false) => debug!(id = %id, "link already absent"),
            Err(e) => {
                error!(id = %id, error = %e, "failed to delete link");
                return Err(e);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shortlink_cache::MokaLinkCache;
    use shortlink_core::ReadLinkRepository;
    use shortlink_generator::{GeneratorError, RandomGenerator};
    use shortlink_storage::InMemoryRepository;
    use std::collections::{HashSet, VecDeque};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Hands out a fixed list of ids, then fails.
    struct ScriptedGenerator {
        ids: Mutex<VecDeque<&'static str>>,
        calls: AtomicUsize,
    }

    impl ScriptedGenerator {
        fn new(ids: impl IntoIterator<Item = &'static str>) -> Self {
            Self {
                ids: Mutex::new(ids.into_iter().collect()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Generator for ScriptedGenerator {
        fn generate(&self) -> std::result::Result<LinkId, GeneratorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.ids
                .lock()
                .unwrap()
                .pop_front()
                .map(LinkId::new_unchecked)
                .ok_or_else(|| GeneratorError::Entropy("script exhausted".to_string()))
        }
    }

    /// An in-memory repository whose calls can be made to fail on demand.
    #[derive(Default)]
    struct StubRepository {
        inner: InMemoryRepository,
        create_failures: Mutex<VecDeque<StorageError>>,
        always_conflict: bool,
        delete_failure: Option<StorageError>,
        get_all_failure: Option<StorageError>,
        create_delay: Option<Duration>,
        get_delay: Option<Duration>,
        create_calls: AtomicUsize,
        get_calls: AtomicUsize,
    }

    impl StubRepository {
        fn failing_creates(errors: impl IntoIterator<Item = StorageError>) -> Self {
            Self {
                create_failures: Mutex::new(errors.into_iter().collect()),
                ..Default::default()
            }
        }

        fn create_calls(&self) -> usize {
            self.create_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ReadLinkRepository for StubRepository {
        async fn get(&self, id: &LinkId) -> shortlink_core::repository::Result<Option<Link>> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            let found = self.inner.get(id).await;
            // Hold on to the (possibly outdated) answer before returning it.
            if let Some(delay) = self.get_delay {
                tokio::time::sleep(delay).await;
            }
            found
        }

        async fn get_all(&self) -> shortlink_core::repository::Result<Vec<Link>> {
            match &self.get_all_failure {
                Some(e) => Err(e.clone()),
                None => self.inner.get_all().await,
            }
        }
    }

    #[async_trait]
    impl LinkRepository for StubRepository {
        async fn create(&self, link: &Link) -> shortlink_core::repository::Result<()> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.create_delay {
                tokio::time::sleep(delay).await;
            }
            if self.always_conflict {
                return Err(StorageError::Conflict(link.id.to_string()));
            }
            if let Some(e) = self.create_failures.lock().unwrap().pop_front() {
                return Err(e);
            }
            self.inner.create(link).await
        }

        async fn delete(&self, id: &LinkId) -> shortlink_core::repository::Result<bool> {
            let deleted = self.inner.delete(id).await?;
            match &self.delete_failure {
                Some(e) => Err(e.clone()),
                None => Ok(deleted),
            }
        }
    }

    /// A cache whose every call fails.
    struct BrokenCache;

    #[async_trait]
    impl LinkCache for BrokenCache {
        async fn get_link(&self, _id: &LinkId) -> shortlink_core::cache::Result<Option<Link>> {
            Err(CacheError::Unavailable("cache is down".to_string()))
        }

        async fn set_link(&self, _id: &LinkId, _link: &Link) -> shortlink_core::cache::Result<()> {
            Err(CacheError::Unavailable("cache is down".to_string()))
        }

        async fn del(&self, _id: &LinkId) -> shortlink_core::cache::Result<()> {
            Err(CacheError::Unavailable("cache is down".to_string()))
        }
    }

    /// A working cache that answers every call after `delay`.
    struct SlowCache {
        inner: MokaLinkCache,
        delay: Duration,
    }

    #[async_trait]
    impl LinkCache for SlowCache {
        async fn get_link(&self, id: &LinkId) -> shortlink_core::cache::Result<Option<Link>> {
            tokio::time::sleep(self.delay).await;
            self.inner.get_link(id).await
        }

        async fn set_link(&self, id: &LinkId, link: &Link) -> shortlink_core::cache::Result<()> {
            tokio::time::sleep(self.delay).await;
            self.inner.set_link(id, link).await
        }

        async fn del(&self, id: &LinkId) -> shortlink_core::cache::Result<()> {
            tokio::time::sleep(self.delay).await;
            self.inner.del(id).await
        }
    }

    fn test_service() -> LinkService<InMemoryRepository, MokaLinkCache, RandomGenerator> {
        LinkService::new(
            InMemoryRepository::new(),
            MokaLinkCache::new(),
            RandomGenerator::default(),
        )
    }

    #[tokio::test]
    async fn create_returns_validated_link_with_8_char_id() {
        let service = test_service();

        let link = service
            .create_link("https://example.com/path")
            .await
            .unwrap();

        assert_eq!(link.id.as_str().len(), 8);
        assert!(link.id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(link.original_url, "https://example.com/path");
        assert_eq!(
            service.repository().get(&link.id).await.unwrap(),
            Some(link)
        );
    }

    #[tokio::test]
    async fn create_rejects_invalid_urls_without_io() {
        let repository = StubRepository::default();
        let generator = ScriptedGenerator::new([]);
        let service = LinkService::new(repository, MokaLinkCache::new(), generator);

        let too_long = format!("http://example.com/{}", "a".repeat(2049));
        for url in ["ftp://x.com", "not a url", "", too_long.as_str()] {
            let err = service.create_link(url).await.unwrap_err();
            assert!(matches!(err, LinkError::InvalidArgument(_)), "{url}");
        }

        assert_eq!(service.repository().create_calls(), 0);
        assert_eq!(service.generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn create_populates_cache() {
        let service = test_service();

        let link = service.create_link("https://example.com").await.unwrap();

        assert_eq!(
            service.cache().get_link(&link.id).await.unwrap(),
            Some(link)
        );
    }

    #[tokio::test]
    async fn created_ids_are_unique() {
        let service = test_service();
        let mut ids = HashSet::new();

        for i in 0..200 {
            let link = service
                .create_link(&format!("https://example.com/{i}"))
                .await
                .unwrap();
            assert!(ids.insert(link.id));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_never_share_an_id() {
        let service = test_service();
        let mut handles = vec![];

        for i in 0..64 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .create_link(&format!("https://example.com/{i}"))
                    .await
                    .unwrap()
            }));
        }

        let mut ids = HashSet::new();
        for handle in handles {
            assert!(ids.insert(handle.await.unwrap().id));
        }
        assert_eq!(service.repository().len(), 64);
    }

    #[tokio::test]
    async fn create_recovers_from_collisions_with_third_id() {
        let repository = StubRepository::failing_creates([
            StorageError::Conflict("first111".to_string()),
            StorageError::Conflict("second22".to_string()),
        ]);
        let generator = ScriptedGenerator::new(["first111", "second22", "third333"]);
        let service = LinkService::new(repository, MokaLinkCache::new(), generator);

        let link = service.create_link("https://example.com").await.unwrap();

        assert_eq!(link.id.as_str(), "third333");
        assert_eq!(service.repository().create_calls(), 3);
        assert!(service.cache().get_link(&link.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn create_recovers_from_a_real_collision() {
        let service = LinkService::new(
            InMemoryRepository::new(),
            MokaLinkCache::new(),
            ScriptedGenerator::new(["taken123", "taken123", "fresh123"]),
        );

        let first = service.create_link("https://one.example").await.unwrap();
        let second = service.create_link("https://two.example").await.unwrap();

        assert_eq!(first.id.as_str(), "taken123");
        assert_eq!(second.id.as_str(), "fresh123");
        let stored = service.repository().get(&first.id).await.unwrap().unwrap();
        assert_eq!(stored.original_url, "https://one.example");
    }

    #[tokio::test]
    async fn create_fails_after_exactly_three_conflicts() {
        let repository = StubRepository {
            always_conflict: true,
            ..Default::default()
        };
        let generator = ScriptedGenerator::new(["aaaaaaaa", "bbbbbbbb", "cccccccc", "dddddddd"]);
        let service = LinkService::new(repository, MokaLinkCache::new(), generator);

        let err = service.create_link("https://example.com").await.unwrap_err();

        assert!(matches!(err, LinkError::CreateFailed));
        assert_eq!(
            err.to_string(),
            "failed to create unique link, please try again"
        );
        assert_eq!(service.repository().create_calls(), 3);
        assert_eq!(service.generator.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn configured_attempt_budget_is_honored() {
        let repository = StubRepository {
            always_conflict: true,
            ..Default::default()
        };
        let config = ServiceConfig::builder().max_attempts(5).build();
        let service = LinkService::with_config(
            repository,
            MokaLinkCache::new(),
            RandomGenerator::default(),
            config,
        );

        let err = service.create_link("https://example.com").await.unwrap_err();

        assert!(matches!(err, LinkError::CreateFailed));
        assert_eq!(service.repository().create_calls(), 5);
    }

    #[tokio::test]
    async fn non_conflict_store_errors_surface_without_retry() {
        let repository =
            StubRepository::failing_creates([StorageError::Unavailable("db down".to_string())]);
        let service = LinkService::new(repository, MokaLinkCache::new(), RandomGenerator::default());

        let err = service.create_link("https://example.com").await.unwrap_err();

        assert!(matches!(
            err,
            LinkError::Store(StorageError::Unavailable(_))
        ));
        assert_eq!(service.repository().create_calls(), 1);
        assert!(service.repository().inner.is_empty());
    }

    #[tokio::test]
    async fn generator_failure_is_internal_and_skips_repository() {
        let service = LinkService::new(
            StubRepository::default(),
            MokaLinkCache::new(),
            ScriptedGenerator::new([]),
        );

        let err = service.create_link("https://example.com").await.unwrap_err();

        assert!(matches!(err, LinkError::Internal(_)));
        assert_eq!(service.repository().create_calls(), 0);
    }

    #[tokio::test]
    async fn cache_failure_does_not_fail_create() {
        let service = LinkService::new(
            InMemoryRepository::new(),
            BrokenCache,
            RandomGenerator::default(),
        );

        let link = service.create_link("https://example.com").await.unwrap();

        assert!(service.repository().get(&link.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn slow_repository_yields_deadline_exceeded() {
        let repository = StubRepository {
            create_delay: Some(Duration::from_secs(5)),
            ..Default::default()
        };
        let config = ServiceConfig::builder()
            .operation_timeout(Duration::from_millis(20))
            .build();
        let service = LinkService::with_config(
            repository,
            MokaLinkCache::new(),
            RandomGenerator::default(),
            config,
        );

        let err = service.create_link("https://example.com").await.unwrap_err();

        assert!(matches!(err, LinkError::DeadlineExceeded("create")));
        assert_eq!(service.repository().create_calls(), 1);
    }

    #[tokio::test]
    async fn list_round_trip_after_delete() {
        let service = test_service();

        let a = service.create_link("https://a.example").await.unwrap();
        let b = service.create_link("https://b.example").await.unwrap();
        service.delete_link(a.id.as_str()).await.unwrap();

        let links = service.get_all_links().await.unwrap();
        assert_eq!(links, vec![b]);
    }

    #[tokio::test]
    async fn list_surfaces_store_errors() {
        let repository = StubRepository {
            get_all_failure: Some(StorageError::Query("boom".to_string())),
            ..Default::default()
        };
        let service = LinkService::new(repository, MokaLinkCache::new(), RandomGenerator::default());

        let err = service.get_all_links().await.unwrap_err();
        assert!(matches!(err, LinkError::Store(StorageError::Query(_))));
    }

    #[tokio::test]
    async fn delete_nonexistent_is_success() {
        let service = test_service();

        service.delete_link("nope1234").await.unwrap();
        service.delete_link("nope1234").await.unwrap();
    }

    #[tokio::test]
    async fn delete_malformed_id_is_success() {
        let service = test_service();

        service.delete_link("../../etc").await.unwrap();
    }

    #[tokio::test]
    async fn delete_rejects_empty_id() {
        let service = test_service();

        let err = service.delete_link("").await.unwrap_err();
        assert!(matches!(err, LinkError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn delete_invalidates_cache() {
        let service = test_service();
        let link = service.create_link("https://example.com").await.unwrap();
        assert!(service.cache().get_link(&link.id).await.unwrap().is_some());

        service.delete_link(link.id.as_str()).await.unwrap();

        assert!(service.cache().get_link(&link.id).await.unwrap().is_none());
        assert!(service.repository().get(&link.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_clears_stale_cache_entry_without_repository_row() {
        let service = test_service();
        let stale = Link::new(LinkId::new_unchecked("stale123"), "https://old.example");
        service.cache().set_link(&stale.id, &stale).await.unwrap();

        service.delete_link("stale123").await.unwrap();

        assert!(service.cache().get_link(&stale.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_invalidates_cache_even_when_repository_fails() {
        let repository = StubRepository {
            delete_failure: Some(StorageError::Unavailable("db down".to_string())),
            ..Default::default()
        };
        let service = LinkService::new(repository, MokaLinkCache::new(), RandomGenerator::default());
        let link = Link::new(LinkId::new_unchecked("abc123XY"), "https://example.com");
        service.repository().inner.create(&link).await.unwrap();
        service.cache().set_link(&link.id, &link).await.unwrap();

        let err = service.delete_link("abc123XY").await.unwrap_err();

        assert!(matches!(err, LinkError::Store(StorageError::Unavailable(_))));
        assert!(service.cache().get_link(&link.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn cache_failure_does_not_fail_delete() {
        let service = LinkService::new(
            InMemoryRepository::new(),
            BrokenCache,
            RandomGenerator::default(),
        );
        let link = service.create_link("https://example.com").await.unwrap();

        service.delete_link(link.id.as_str()).await.unwrap();

        assert!(service.repository().is_empty());
    }

    #[tokio::test]
    async fn get_reads_through_and_populates_cache() {
        let service = LinkService::new(
            StubRepository::default(),
            MokaLinkCache::new(),
            RandomGenerator::default(),
        );
        let link = Link::new(LinkId::new_unchecked("abc123XY"), "https://example.com");
        service.repository().inner.create(&link).await.unwrap();

        let first = service.get_link("abc123XY").await.unwrap();
        let second = service.get_link("abc123XY").await.unwrap();

        assert_eq!(first, Some(link.clone()));
        assert_eq!(second, Some(link.clone()));
        // One read plus one confirmation after filling the cache.
        assert_eq!(service.repository().get_calls.load(Ordering::SeqCst), 2);
        assert_eq!(
            service.cache().get_link(&link.id).await.unwrap(),
            Some(link)
        );
    }

    #[tokio::test]
    async fn get_missing_and_malformed_ids_return_none() {
        let service = test_service();

        assert!(service.get_link("missing1").await.unwrap().is_none());
        assert!(service.get_link("not/an-id").await.unwrap().is_none());
        assert!(matches!(
            service.get_link("").await,
            Err(LinkError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn get_falls_back_to_repository_when_cache_fails() {
        let service = LinkService::new(
            InMemoryRepository::new(),
            BrokenCache,
            RandomGenerator::default(),
        );
        let link = service.create_link("https://example.com").await.unwrap();

        let found = service.get_link(link.id.as_str()).await.unwrap();
        assert_eq!(found, Some(link));
    }

    #[tokio::test]
    async fn get_does_not_cache_missing_links() {
        let service = test_service();
        let id = LinkId::new_unchecked("missing1");

        assert!(service.get_link(id.as_str()).await.unwrap().is_none());
        assert!(service.cache().get_link(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_during_read_through_leaves_no_stale_cache_entry() {
        let repository = StubRepository {
            get_delay: Some(Duration::from_millis(100)),
            ..Default::default()
        };
        let service = LinkService::new(repository, MokaLinkCache::new(), RandomGenerator::default());
        let link = Link::new(LinkId::new_unchecked("abc123XY"), "https://example.com");
        service.repository().inner.create(&link).await.unwrap();

        let reader = {
            let service = service.clone();
            tokio::spawn(async move { service.get_link("abc123XY").await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        service.delete_link("abc123XY").await.unwrap();
        reader.await.unwrap().unwrap();

        assert!(service.repository().inner.get(&link.id).await.unwrap().is_none());
        assert!(service.cache().get_link(&link.id).await.unwrap().is_none());
        assert!(service.get_link("abc123XY").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn slow_cache_times_out_without_failing_operations() {
        let cache = SlowCache {
            inner: MokaLinkCache::new(),
            delay: Duration::from_secs(5),
        };
        let config = ServiceConfig::builder()
            .operation_timeout(Duration::from_millis(20))
            .build();
        let service = LinkService::with_config(
            InMemoryRepository::new(),
            cache,
            RandomGenerator::default(),
            config,
        );
        let started = std::time::Instant::now();

        let link = service.create_link("https://example.com").await.unwrap();
        let found = service.get_link(link.id.as_str()).await.unwrap();
        service.delete_link(link.id.as_str()).await.unwrap();

        assert_eq!(found, Some(link.clone()));
        assert!(service.repository().get(&link.id).await.unwrap().is_none());
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
