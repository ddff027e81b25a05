//! Repository trait for the click event log.

use crate::domain::entities::{ClickEvent, DeviceCount, NewClickEvent};
use crate::error::AppError;
use async_trait::async_trait;

/// Append-only store of [`ClickEvent`]s.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Appends one click event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the referenced link does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, new_click: NewClickEvent) -> Result<ClickEvent, AppError>;

    /// Counts the events recorded for a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_for_link(&self, link_id: i64) -> Result<i64, AppError>;

    /// Groups a link's events by device class.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn device_breakdown(&self, link_id: i64) -> Result<Vec<DeviceCount>, AppError>;
}
