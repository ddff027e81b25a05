//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{
    ClickQueue, LinkResolver, LinkService, RedirectService, StatsService,
};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::infrastructure::cache::LinkCache;

/// Services shared by every request. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub redirect_service: Arc<RedirectService>,
    pub link_service: Arc<LinkService>,
    pub stats_service: Arc<StatsService>,
    pub cache: LinkCache,
}

impl AppState {
    /// Wires the services over the given repositories and cache.
    ///
    /// `home_url` is where unknown codes and failed lookups are redirected.
    /// `click_queue` must have a running [`crate::application::services::run_click_worker`].
    pub fn new(
        links: Arc<dyn LinkRepository>,
        clicks: Arc<dyn ClickRepository>,
        cache: LinkCache,
        home_url: impl Into<String>,
        click_queue: ClickQueue,
    ) -> Self {
        let resolver = LinkResolver::new(links.clone(), cache.clone());

        Self {
            redirect_service: Arc::new(RedirectService::new(
                resolver,
                click_queue,
                home_url.into(),
            )),
            link_service: Arc::new(LinkService::new(links.clone(), cache.clone())),
            stats_service: Arc::new(StatsService::new(links, clicks)),
            cache,
        }
    }
}
