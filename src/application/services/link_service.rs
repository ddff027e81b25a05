//! Link mutations that keep the redirect cache coherent.
//!
//! Links are created and edited by the dashboard application. Whatever commits
//! a change to a link row goes through here (or calls
//! [`LinkService::invalidate`] itself) so a cached redirect never outlives the
//! row it was copied from.

use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::LinkCache;
use serde_json::json;
use tracing::info;
use url::Url;

pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    cache: LinkCache,
}

impl LinkService {
    pub fn new(links: Arc<dyn LinkRepository>, cache: LinkCache) -> Self {
        Self { links, cache }
    }

    /// Points an existing link at a new URL, then drops its cache entries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `destination_url` is not an absolute
    /// `http`/`https` URL.
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_destination(
        &self,
        code: &str,
        destination_url: &str,
    ) -> Result<Link, AppError> {
        validate_destination(destination_url)?;

        let link = self
            .links
            .update_destination(code, destination_url)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        self.cache.invalidate(code).await;
        info!(code, link_id = link.id, "Link destination updated");

        Ok(link)
    }

    /// Deletes a link and its click events, then drops its cache entries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete(&self, code: &str) -> Result<(), AppError> {
        if !self.links.delete_by_code(code).await? {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ));
        }

        self.cache.invalidate(code).await;
        info!(code, "Link deleted");

        Ok(())
    }

    /// Drops cached copies of a link after an out-of-band change.
    ///
    /// A no-op when caching is disabled or the code was never cached.
    pub async fn invalidate(&self, code: &str) {
        self.cache.invalidate(code).await;
    }

    /// Checks that the system of record is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if it is not.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.links.ping().await
    }
}

fn validate_destination(destination_url: &str) -> Result<(), AppError> {
    let url = Url::parse(destination_url).map_err(|e| {
        AppError::bad_request(
            "Invalid destination URL",
            json!({ "reason": e.to_string() }),
        )
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::bad_request(
            "Destination URL must use http or https",
            json!({ "scheme": url.scheme() }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::infrastructure::cache::{CacheTtls, MockCacheService};

    fn cache_expecting_invalidations(times: usize) -> LinkCache {
        let mut backend = MockCacheService::new();
        backend
            .expect_delete()
            .withf(|keys| keys == ["link:abc".to_string(), "link:meta:abc".to_string()])
            .times(times)
            .returning(|_| Ok(()));
        LinkCache::new(Arc::new(backend), CacheTtls::default())
    }

    #[tokio::test]
    async fn test_update_destination_invalidates_cache() {
        let mut repo = MockLinkRepository::new();
        repo.expect_update_destination()
            .withf(|code, url| code == "abc" && url == "https://new.example.com")
            .times(1)
            .returning(|_, url| Ok(Some(Link::standard(1, "abc", url))));

        let service = LinkService::new(Arc::new(repo), cache_expecting_invalidations(1));

        let link = service
            .update_destination("abc", "https://new.example.com")
            .await
            .unwrap();
        assert_eq!(link.destination_url, "https://new.example.com");
    }

    #[tokio::test]
    async fn test_update_destination_rejects_bad_url() {
        let mut repo = MockLinkRepository::new();
        repo.expect_update_destination().times(0);

        let service = LinkService::new(Arc::new(repo), cache_expecting_invalidations(0));

        for url in ["not-a-url", "javascript:alert(1)", "ftp://files.example.com"] {
            let result = service.update_destination("abc", url).await;
            assert!(matches!(result, Err(AppError::Validation { .. })));
        }
    }

    #[tokio::test]
    async fn test_update_unknown_link_is_not_found() {
        let mut repo = MockLinkRepository::new();
        repo.expect_update_destination().returning(|_, _| Ok(None));

        let service = LinkService::new(Arc::new(repo), cache_expecting_invalidations(0));

        let result = service
            .update_destination("abc", "https://example.com")
            .await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_invalidates_cache() {
        let mut repo = MockLinkRepository::new();
        repo.expect_delete_by_code()
            .withf(|code| code == "abc")
            .times(1)
            .returning(|_| Ok(true));

        let service = LinkService::new(Arc::new(repo), cache_expecting_invalidations(1));
        assert!(service.delete("abc").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_unknown_link() {
        let mut repo = MockLinkRepository::new();
        repo.expect_delete_by_code().returning(|_| Ok(false));

        let service = LinkService::new(Arc::new(repo), cache_expecting_invalidations(0));
        assert!(matches!(
            service.delete("abc").await,
            Err(AppError::NotFound { .. })
        ));
    }
}
