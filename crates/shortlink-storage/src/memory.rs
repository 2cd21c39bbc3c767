use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use shortlink_core::repository::Result;
use shortlink_core::{Link, LinkId, LinkRepository, ReadLinkRepository, StorageError};
use tracing::trace;

/// A process-local link store backed by a sharded `DashMap`.
///
/// Creates go through the entry API, so the uniqueness check and the
/// insert happen under the same shard lock. Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    storage: DashMap<LinkId, Link>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl ReadLinkRepository for InMemoryRepository {
    async fn get(&self, id: &LinkId) -> Result<Option<Link>> {
        Ok(self.storage.get(id).map(|entry| entry.value().clone()))
    }

    async fn get_all(&self) -> Result<Vec<Link>> {
        Ok(self
            .storage
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }
}

#[async_trait]
impl LinkRepository for InMemoryRepository {
    async fn create(&self, link: &Link) -> Result<()> {
        match self.storage.entry(link.id.clone()) {
            Entry::Occupied(_) => {
                trace!(id = %link.id, "id already taken");
                Err(StorageError::Conflict(link.id.to_string()))
            }
            Entry::Vacant(slot) => {
                slot.insert(link.clone());
                Ok(())
            }
        }
    }

    async fn delete(&self, id: &LinkId) -> Result<bool> {
        Ok(self.storage.remove(id).is_some())
    }
}
