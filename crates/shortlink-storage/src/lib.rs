//! Repository adapters for the Shortlink link service.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryRepository;
pub use postgres::PostgresRepository;
pub use shortlink_core::repository::Result;
pub use shortlink_core::{LinkRepository, ReadLinkRepository, StorageError};
