use async_trait::async_trait;
use moka::future::Cache;
use shortlink_core::cache::Result;
use shortlink_core::{Link, LinkCache, LinkId};
use std::time::Duration;
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

const DEFAULT_MAX_CAPACITY: u64 = 10_000;

/// An in-process cache implementation using Moka.
///
/// Suited to single-node deployments, or to tests that need a real cache
/// without a Redis server.
#[derive(Debug, Clone)]
pub struct MokaLinkCache {
    cache: Cache<LinkId, Link>,
}

impl MokaLinkCache {
    /// Creates a new Moka link cache holding at most 10,000 entries, with no expiry.
    pub fn new() -> Self {
        CacheConfig::default().into()
    }
}

impl Default for MokaLinkCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkCache for MokaLinkCache {
    async fn get_link(&self, id: &LinkId) -> Result<Option<Link>> {
        match self.cache.get(id).await {
            Some(link) => {
                debug!(id = %id, "Cache hit in Moka");
                Ok(Some(link))
            }
            None => {
                trace!(id = %id, "Cache miss in Moka");
                Ok(None)
            }
        }
    }

    async fn set_link(&self, id: &LinkId, link: &Link) -> Result<()> {
        self.cache.insert(id.clone(), link.clone()).await;
        debug!(id = %id, "Cached link in Moka");
        Ok(())
    }

    async fn del(&self, id: &LinkId) -> Result<()> {
        self.cache.invalidate(id).await;
        debug!(id = %id, "Removed link from Moka cache (if present)");
        Ok(())
    }
}

/// Sizing and expiry for a [`MokaLinkCache`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct CacheConfig {
    #[builder(default = DEFAULT_MAX_CAPACITY)]
    pub max_capacity: u64,
    /// Entries expire this long after insertion. `None` keeps them until evicted.
    #[builder(default)]
    pub ttl: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl From<CacheConfig> for MokaLinkCache {
    fn from(config: CacheConfig) -> Self {
        let mut builder = Cache::builder().max_capacity(config.max_capacity);
        if let Some(ttl) = config.ttl {
            builder = builder.time_to_live(ttl);
        }
        Self {
            cache: builder.build(),
        }
    }
}
