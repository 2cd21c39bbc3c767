//! Core types and traits for the Shortlink link service.
//!
//! This crate provides the [`Link`] entity, its [`LinkId`] key, and the
//! repository and cache contracts that the link service is written
//! against. Concrete adapters live in `shortlink-storage` and
//! `shortlink-cache`.

pub mod cache;
pub mod error;
pub mod link;
pub mod link_id;
pub mod repository;

pub use cache::LinkCache;
pub use error::{CacheError, CoreError, StorageError};
pub use link::Link;
pub use link_id::LinkId;
pub use repository::{LinkRepository, ReadLinkRepository};
