pub mod error;
pub mod random;

pub use error::GeneratorError;
pub use random::{EntropySource, RandomGenerator, ALPHABET};

use shortlink_core::LinkId;

/// Trait for generating link ids.
///
/// Implementations are pure generators that don't interact with storage;
/// uniqueness is enforced by the repository, and the link service retries
/// on collision.
pub trait Generator: Send + Sync + 'static {
    /// Generates a fresh link id.
    ///
    /// Fails rather than returning a weaker id when the underlying source
    /// cannot produce one.
    fn generate(&self) -> Result<LinkId, GeneratorError>;
}
