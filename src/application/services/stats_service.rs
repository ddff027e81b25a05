//! Click statistics computed on read.

use std::sync::Arc;

use crate::domain::entities::DeviceCount;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;
use serde::Serialize;
use serde_json::json;

/// Counter value and event-log aggregates for one link.
///
/// `clicks` and `events` can differ: the two are written separately and a
/// failure between them leaves them apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkSummary {
    pub code: String,
    pub clicks: i64,
    pub events: i64,
    pub devices: Vec<DeviceCount>,
}

/// Service for reading click statistics. Always reads the database, never the cache.
pub struct StatsService {
    links: Arc<dyn LinkRepository>,
    clicks: Arc<dyn ClickRepository>,
}

impl StatsService {
    pub fn new(links: Arc<dyn LinkRepository>, clicks: Arc<dyn ClickRepository>) -> Self {
        Self { links, clicks }
    }

    /// Summarizes a link's clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn link_summary(&self, code: &str) -> Result<LinkSummary, AppError> {
        let link = self
            .links
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Statistics not found", json!({ "code": code })))?;

        let events = self.clicks.count_for_link(link.id).await?;
        let devices = self.clicks.device_breakdown(link.id).await?;

        Ok(LinkSummary {
            code: link.code,
            clicks: link.clicks,
            events,
            devices,
        })
    }
}
