//! Click event recording.

use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::domain::RequestContext;
use crate::domain::entities::NewClickEvent;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::utils::client_ip::client_ip;
use crate::utils::referrer::normalize_referrer;
use crate::utils::user_agent::parse_user_agent;

/// What happened to one click. Diagnostics only; callers are never expected
/// to act on failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Event stored and counter incremented.
    Recorded,
    /// Event insert failed; the counter was left alone.
    InsertFailed,
    /// Event stored but the counter increment failed or hit no row.
    IncrementFailed,
}

/// Turns a redirect's request context into a stored click and a counter bump.
///
/// Analytics never get in the way of a redirect: [`ClickRecorder::record`]
/// cannot fail, it logs and returns an outcome instead.
pub struct ClickRecorder {
    links: Arc<dyn LinkRepository>,
    clicks: Arc<dyn ClickRepository>,
}

impl ClickRecorder {
    pub fn new(links: Arc<dyn LinkRepository>, clicks: Arc<dyn ClickRepository>) -> Self {
        Self { links, clicks }
    }

    /// Builds the insert payload. Pure: missing headers become `"Unknown"`/`None`.
    pub fn build_event(link_id: i64, ctx: &RequestContext) -> NewClickEvent {
        let parsed = parse_user_agent(ctx.user_agent.as_deref());

        NewClickEvent {
            link_id,
            ip: client_ip(ctx),
            device: parsed.device,
            os: parsed.os,
            browser: parsed.browser,
            referrer: normalize_referrer(ctx.referer.as_deref()),
            user_agent: ctx.user_agent.clone(),
        }
    }

    /// Appends a click event, then increments the link's counter by one.
    ///
    /// The two writes are separate statements. If the insert fails the
    /// increment is skipped; if the increment fails the event stays. Either
    /// way the failure is logged with the link id and stage.
    pub async fn record(&self, link_id: i64, ctx: &RequestContext) -> RecordOutcome {
        let event = Self::build_event(link_id, ctx);

        if let Err(e) = self.clicks.insert(event).await {
            metrics::counter!("click_record_failures_total", "stage" => "insert").increment(1);
            error!(link_id, stage = "insert", error = %e, "Failed to record click");
            return RecordOutcome::InsertFailed;
        }

        match self.links.increment_clicks(link_id).await {
            Ok(true) => {
                metrics::counter!("clicks_recorded_total").increment(1);
                debug!(link_id, "Click recorded");
                RecordOutcome::Recorded
            }
            Ok(false) => {
                metrics::counter!("click_record_failures_total", "stage" => "increment")
                    .increment(1);
                warn!(link_id, stage = "increment", "Link vanished before counter increment");
                RecordOutcome::IncrementFailed
            }
            Err(e) => {
                metrics::counter!("click_record_failures_total", "stage" => "increment")
                    .increment(1);
                error!(link_id, stage = "increment", error = %e, "Failed to increment click counter");
                RecordOutcome::IncrementFailed
            }
        }
    }
}
