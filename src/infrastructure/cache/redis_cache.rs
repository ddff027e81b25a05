//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};
use url::Url;

/// Lifecycle of the shared Redis handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedisCacheState {
    /// No request has needed the cache yet.
    Uninitialized,
    /// Connected; the handle is reused by every request.
    Ready,
    /// The single connection attempt failed. The cache stays empty until restart.
    PermanentlyUnavailable,
}

/// Redis cache with lazy, one-shot initialization.
///
/// Nothing is connected at construction. The first operation connects through
/// a [`OnceCell`], so concurrent first callers wait on the same attempt instead
/// of opening duplicate clients. A failed attempt is remembered for the
/// lifetime of the process and every later call behaves like [`super::NullCache`].
///
/// Once connected, the `ConnectionManager` is cloned per operation; clones share
/// one multiplexed connection.
pub struct RedisCache {
    endpoint: String,
    token: String,
    connection: OnceCell<Option<ConnectionManager>>,
}

impl RedisCache {
    /// Creates a cache for `endpoint`, authenticating with `token` as the
    /// Redis password. No I/O happens until the first operation.
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            connection: OnceCell::new(),
        }
    }

    /// Current initialization state, for diagnostics and tests.
    pub fn state(&self) -> RedisCacheState {
        match self.connection.get() {
            None => RedisCacheState::Uninitialized,
            Some(Some(_)) => RedisCacheState::Ready,
            Some(None) => RedisCacheState::PermanentlyUnavailable,
        }
    }

    async fn connection(&self) -> Option<ConnectionManager> {
        self.connection
            .get_or_init(|| async {
                match self.connect().await {
                    Ok(manager) => {
                        info!("✓ Connected to cache");
                        Some(manager)
                    }
                    Err(e) => {
                        warn!("{}. Cache disabled until restart.", e);
                        None
                    }
                }
            })
            .await
            .clone()
    }

    async fn connect(&self) -> CacheResult<ConnectionManager> {
        let url = authenticated_url(&self.endpoint, &self.token)?;
        info!("Connecting to cache at {}", self.endpoint);

        let client = Client::open(url.as_str()).map_err(|e| {
            CacheError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::Connection(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {}", e)))?;

        Ok(manager)
    }
}

/// Puts the access token into the endpoint URL as its password.
fn authenticated_url(endpoint: &str, token: &str) -> CacheResult<Url> {
    let mut url = Url::parse(endpoint)
        .map_err(|e| CacheError::Connection(format!("Invalid cache endpoint: {}", e)))?;

    if !matches!(url.scheme(), "redis" | "rediss") {
        return Err(CacheError::Connection(format!(
            "Unsupported cache scheme '{}'",
            url.scheme()
        )));
    }

    url.set_password(Some(token))
        .map_err(|_| CacheError::Connection("Cache endpoint has no host".to_string()))?;

    Ok(url)
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let Some(mut conn) = self.connection().await else {
            return Ok(None);
        };

        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| CacheError::Operation(format!("GET {}: {}", key, e)))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let Some(mut conn) = self.connection().await else {
            return Ok(());
        };

        conn.set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1))
            .await
            .map_err(|e| CacheError::Operation(format!("SET {}: {}", key, e)))?;

        debug!("Cache SET: {} (TTL: {}s)", key, ttl.as_secs());
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> CacheResult<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let Some(mut conn) = self.connection().await else {
            return Ok(());
        };

        let deleted = conn
            .del::<_, i64>(keys)
            .await
            .map_err(|e| CacheError::Operation(format!("DEL {:?}: {}", keys, e)))?;

        debug!("Cache DEL: {:?} ({} removed)", keys, deleted);
        Ok(())
    }

    async fn is_available(&self) -> bool {
        self.connection().await.is_some()
    }
}
