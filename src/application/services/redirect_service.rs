//! Redirect orchestration: resolve, choose a target, record in the background.

use tracing::{debug, error, warn};

use super::click_queue::ClickQueue;
use super::link_resolver::LinkResolver;
use crate::domain::RequestContext;

/// Where a redirect request ends up. There is no error variant: every failure
/// sends the visitor home.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectResponse {
    /// The link's destination (a URL or a `upi://pay` deep link).
    Destination(String),
    /// The application home route.
    Home(String),
}

impl RedirectResponse {
    /// Value for the `Location` header.
    pub fn location(&self) -> &str {
        match self {
            Self::Destination(url) | Self::Home(url) => url,
        }
    }

    fn outcome(&self) -> &'static str {
        match self {
            Self::Destination(_) => "destination",
            Self::Home(_) => "home",
        }
    }
}

/// Answers `GET /{code}`.
///
/// Resolution happens inline; the click goes onto the [`ClickQueue`] and is
/// recorded by the worker, so a slow or broken analytics store cannot delay
/// the redirect and a client hanging up does not cancel the recording.
pub struct RedirectService {
    resolver: LinkResolver,
    clicks: ClickQueue,
    home_url: String,
}

impl RedirectService {
    pub fn new(resolver: LinkResolver, clicks: ClickQueue, home_url: String) -> Self {
        Self {
            resolver,
            clicks,
            home_url,
        }
    }

    pub fn home_url(&self) -> &str {
        &self.home_url
    }

    /// Redirect sent for unknown codes and for any failure on the path.
    pub fn home(&self) -> RedirectResponse {
        RedirectResponse::Home(self.home_url.clone())
    }

    /// Resolves `code` and picks the redirect target.
    pub async fn handle(&self, code: &str, ctx: RequestContext) -> RedirectResponse {
        let response = self.dispatch(code, ctx).await;
        metrics::counter!("redirects_total", "outcome" => response.outcome()).increment(1);
        response
    }

    async fn dispatch(&self, code: &str, ctx: RequestContext) -> RedirectResponse {
        let link = match self.resolver.resolve(code).await {
            Ok(Some(link)) => link,
            Ok(None) => {
                debug!(code, "Short link not found, redirecting home");
                return self.home();
            }
            Err(e) => {
                error!(code, error = %e, "Short link lookup failed, redirecting home");
                return self.home();
            }
        };

        let destination = match link.destination() {
            Ok(destination) => destination,
            Err(e) => {
                warn!(code, link_id = link.id, error = %e, "Unusable destination, redirecting home");
                return self.home();
            }
        };

        self.clicks.enqueue(link.id, ctx);

        RedirectResponse::Destination(destination)
    }
}
