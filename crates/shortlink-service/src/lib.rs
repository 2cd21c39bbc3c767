//! The link service: creates, lists, looks up and deletes short links.
//!
//! [`LinkService`] is written against the repository and cache contracts
//! from `shortlink_core` and an id [`Generator`](shortlink_generator::Generator).
//! The repository is authoritative; the cache is populated and invalidated
//! around it on a best-effort basis.

pub mod config;
pub mod error;
pub mod metrics;
pub mod service;
pub mod shortener;
pub mod validate;

pub use config::ServiceConfig;
pub use error::{LinkError, Result};
pub use service::LinkService;
pub use shortener::LinkShortener;
