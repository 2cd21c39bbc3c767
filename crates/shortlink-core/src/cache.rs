use crate::error::CacheError;
use crate::link::Link;
use crate::link_id::LinkId;
use async_trait::async_trait;

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

/// A best-effort cache of links keyed by [`LinkId`].
///
/// The cache is never the source of truth. Callers are expected to log
/// and swallow its errors rather than fail the surrounding operation.
#[async_trait]
pub trait LinkCache: Send + Sync + 'static {
    /// Get a link from the cache.
    ///
    /// Returns `Ok(None)` if the key is not in the cache.
    async fn get_link(&self, id: &LinkId) -> Result<Option<Link>>;

    /// Store a link in the cache.
    async fn set_link(&self, id: &LinkId, link: &Link) -> Result<()>;

    /// Remove a link from the cache.
    ///
    /// It is not an error if the key does not exist.
    async fn del(&self, id: &LinkId) -> Result<()>;
}
