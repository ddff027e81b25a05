//! Caching layer for fast redirect lookups.
//!
//! Provides a [`CacheService`] trait with two implementations:
//! - [`RedisCache`] - Redis-backed cache, connected lazily on first use
//! - [`NullCache`] - No-op implementation for when no cache is configured
//!
//! [`LinkCache`] sits on top of either and owns key naming, TTLs,
//! serialization and invalidation for links.

mod link_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use link_cache::{CacheTtls, LinkCache};
pub use null_cache::NullCache;
pub use redis_cache::{RedisCache, RedisCacheState};
pub use service::{CacheError, CacheResult, CacheService};

#[cfg(test)]
pub use service::MockCacheService;
