use crate::error::StorageError;
use crate::link::Link;
use crate::link_id::LinkId;
use async_trait::async_trait;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of a link repository.
#[async_trait]
pub trait ReadLinkRepository: Send + Sync + 'static {
    /// Retrieves the link with the given id.
    /// Returns `None` if the id does not exist.
    async fn get(&self, id: &LinkId) -> Result<Option<Link>>;

    /// Returns every stored link. Ordering is implementation-defined.
    async fn get_all(&self) -> Result<Vec<Link>>;
}

/// The durable, authoritative store of links.
///
/// Implementations must enforce id uniqueness themselves; the link service
/// relies on [`StorageError::Conflict`] to detect collisions under
/// concurrent creates.
#[async_trait]
pub trait LinkRepository: ReadLinkRepository {
    /// Inserts a new link. Returns `Err(Conflict)` if the id already exists.
    async fn create(&self, link: &Link) -> Result<()>;

    /// Deletes the link with the given id.
    /// Returns `true` if the link existed and was removed.
    async fn delete(&self, id: &LinkId) -> Result<bool>;
}
