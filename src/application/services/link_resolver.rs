//! Short code resolution with cache-aside lookup.

use std::sync::Arc;

use crate::domain::entities::{Link, LinkMetadata};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::LinkCache;

/// Longest short code worth a lookup. Anything longer cannot have been issued.
pub const MAX_CODE_LEN: usize = 256;

/// Maps short codes to links, consulting the cache before the database.
///
/// Codes are used exactly as received: no trimming, no case folding.
#[derive(Clone)]
pub struct LinkResolver {
    links: Arc<dyn LinkRepository>,
    cache: LinkCache,
}

impl LinkResolver {
    pub fn new(links: Arc<dyn LinkRepository>, cache: LinkCache) -> Self {
        Self { links, cache }
    }

    /// Resolves a short code to its link.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(link))` from the cache, or from the database (which then
    ///   populates the cache)
    /// - `Ok(None)` when no link has this code, or the code is malformed
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the database lookup fails. Cache
    /// failures never surface here.
    pub async fn resolve(&self, code: &str) -> Result<Option<Link>, AppError> {
        if !is_well_formed(code) {
            return Ok(None);
        }

        if let Some(link) = self.cache.get_link(code).await {
            metrics::counter!("cache_lookups_total", "result" => "hit").increment(1);
            return Ok(Some(link));
        }
        metrics::counter!("cache_lookups_total", "result" => "miss").increment(1);

        let Some(link) = self.links.find_by_code(code).await? else {
            return Ok(None);
        };

        // Write failures are logged inside LinkCache and never fail the lookup.
        self.cache.set_link(&link).await;

        Ok(Some(link))
    }

    /// Resolves only the preview/redirect metadata of a link.
    ///
    /// Checks the metadata entry first, then the full-row entry, then the
    /// database, and stores the result under the metadata key (1 hour TTL).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the database lookup fails.
    pub async fn resolve_metadata(&self, code: &str) -> Result<Option<LinkMetadata>, AppError> {
        if !is_well_formed(code) {
            return Ok(None);
        }

        if let Some(metadata) = self.cache.get_metadata(code).await {
            return Ok(Some(metadata));
        }

        let link = match self.cache.get_link(code).await {
            Some(link) => link,
            None => match self.links.find_by_code(code).await? {
                Some(link) => link,
                None => return Ok(None),
            },
        };

        let metadata = link.metadata();
        self.cache.set_metadata(code, &metadata).await;

        Ok(Some(metadata))
    }
}

/// Empty, oversized and control-character codes are treated as not found.
fn is_well_formed(code: &str) -> bool {
    !code.is_empty() && code.len() <= MAX_CODE_LEN && !code.chars().any(char::is_control)
}
