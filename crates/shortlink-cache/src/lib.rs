//! Link cache adapters shared by Shortlink services.
//!
//! Every adapter implements [`shortlink_core::LinkCache`]. The link service
//! treats all of them as best-effort: errors are logged, never surfaced.

pub mod moka;
pub mod noop;
pub mod redis;

pub use self::moka::{CacheConfig, MokaLinkCache};
pub use self::redis::RedisLinkCache;
pub use noop::NoopLinkCache;
pub use shortlink_core::cache::Result;
pub use shortlink_core::{CacheError, LinkCache};
