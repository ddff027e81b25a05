//! Cache service trait and error types.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),
    #[error("Cache operation error: {0}")]
    Operation(String),
    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Raw key/value cache backend.
///
/// Backends report failures as [`CacheError`]; it is the caller's job
/// ([`crate::infrastructure::cache::LinkCache`]) to log them and carry on as if
/// the entry was missing. A backend that is not configured or could not be
/// reached behaves as an always-empty cache and returns `Ok`.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the stored value, or `Ok(None)` on a miss.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a value that expires after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    /// Removes all given keys in a single round trip. Missing keys are not an error.
    async fn delete(&self, keys: &[String]) -> CacheResult<()>;

    /// Reports whether a working backend is behind this cache. Diagnostics only.
    async fn is_available(&self) -> bool;
}
