use crate::link_id::LinkId;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A shortened link: the unit of storage.
///
/// Links are immutable once created; the only state transition is deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Primary key and public short-path token.
    pub id: LinkId,
    /// The target URL.
    pub original_url: String,
    /// When the link was created.
    pub created_at: Timestamp,
}

impl Link {
    /// Creates a link stamped with the current time.
    pub fn new(id: LinkId, original_url: impl Into<String>) -> Self {
        Self::with_created_at(id, original_url, Timestamp::now())
    }

    pub fn with_created_at(
        id: LinkId,
        original_url: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            original_url: original_url.into(),
            created_at,
        }
    }
}
