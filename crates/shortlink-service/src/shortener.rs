use crate::error::Result;
use async_trait::async_trait;
use shortlink_core::Link;

/// The operations the transport layer exposes.
///
/// Ids arrive as raw strings from the caller; implementations decide how
/// to treat empty or malformed ones.
#[async_trait]
pub trait LinkShortener: Send + Sync + 'static {
    /// Shortens `original_url` under a freshly generated id.
    async fn create_link(&self, original_url: &str) -> Result<Link>;

    /// Looks up a single link. Returns `None` if it does not exist.
    async fn get_link(&self, id: &str) -> Result<Option<Link>>;

    /// Lists every stored link.
    async fn get_all_links(&self) -> Result<Vec<Link>>;

    /// Deletes a link. Deleting an absent id succeeds.
    async fn delete_link(&self, id: &str) -> Result<()>;
}
