//! Typed link cache on top of a raw [`CacheService`].

use super::service::CacheService;
use crate::domain::entities::{Link, LinkMetadata};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const LINK_PREFIX: &str = "link:";
const META_PREFIX: &str = "link:meta:";

/// Expiry for the two kinds of cached entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    pub link: Duration,
    pub metadata: Duration,
}

impl Default for CacheTtls {
    /// 24 hours for full link rows, 1 hour for metadata.
    fn default() -> Self {
        Self {
            link: Duration::from_secs(24 * 60 * 60),
            metadata: Duration::from_secs(60 * 60),
        }
    }
}

/// Cache-aside storage for links and link metadata, keyed by short code.
///
/// Full rows live under `link:{code}` and metadata under `link:meta:{code}`.
/// Every operation is infallible from the caller's view: backend errors are
/// logged and reads degrade to a miss. Entries that fail to decode are removed
/// and reported as a miss.
#[derive(Clone)]
pub struct LinkCache {
    backend: Arc<dyn CacheService>,
    ttls: CacheTtls,
}

impl LinkCache {
    pub fn new(backend: Arc<dyn CacheService>, ttls: CacheTtls) -> Self {
        Self { backend, ttls }
    }

    pub fn link_key(code: &str) -> String {
        format!("{LINK_PREFIX}{code}")
    }

    pub fn metadata_key(code: &str) -> String {
        format!("{META_PREFIX}{code}")
    }

    pub fn ttls(&self) -> CacheTtls {
        self.ttls
    }

    pub async fn get_link(&self, code: &str) -> Option<Link> {
        self.read(&Self::link_key(code)).await
    }

    pub async fn set_link(&self, link: &Link) {
        self.write(&Self::link_key(&link.code), link, self.ttls.link)
            .await;
    }

    pub async fn get_metadata(&self, code: &str) -> Option<LinkMetadata> {
        self.read(&Self::metadata_key(code)).await
    }

    pub async fn set_metadata(&self, code: &str, metadata: &LinkMetadata) {
        self.write(&Self::metadata_key(code), metadata, self.ttls.metadata)
            .await;
    }

    /// Drops both the full-row and the metadata entry for `code` in one call.
    ///
    /// Safe to call when caching is disabled or the code was never cached.
    pub async fn invalidate(&self, code: &str) {
        let keys = [Self::link_key(code), Self::metadata_key(code)];
        match self.backend.delete(&keys).await {
            Ok(()) => debug!("Cache INVALIDATE: {}", code),
            Err(e) => warn!("Cache invalidation failed for {}: {}", code, e),
        }
    }

    pub async fn is_available(&self) -> bool {
        self.backend.is_available().await
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("Cache MISS: {}", key);
                return None;
            }
            Err(e) => {
                warn!("Cache read failed for {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!("Cache HIT: {}", key);
                Some(value)
            }
            Err(e) => {
                warn!("Discarding undecodable cache entry {}: {}", key, e);
                if let Err(e) = self.backend.delete(&[key.to_string()]).await {
                    warn!("Cache cleanup failed for {}: {}", key, e);
                }
                None
            }
        }
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Cannot serialize cache entry {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.backend.set(key, &raw, ttl).await {
            warn!("Cache write failed for {}: {}", key, e);
        }
    }
}
