use async_trait::async_trait;
use shortlink_core::cache::Result;
use shortlink_core::{Link, LinkCache, LinkId};

/// A cache that stores nothing. Every lookup is a miss.
///
/// Used when a deployment runs without a cache backend, so the link service
/// keeps a single code path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLinkCache;

#[async_trait]
impl LinkCache for NoopLinkCache {
    async fn get_link(&self, _id: &LinkId) -> Result<Option<Link>> {
        Ok(None)
    }

    async fn set_link(&self, _id: &LinkId, _link: &Link) -> Result<()> {
        Ok(())
    }

    async fn del(&self, _id: &LinkId) -> Result<()> {
        Ok(())
    }
}
