//! Business logic services for the application layer.

pub mod click_queue;
pub mod click_recorder;
pub mod link_resolver;
pub mod link_service;
pub mod redirect_service;
pub mod stats_service;

pub use click_queue::{ClickJob, ClickQueue, run_click_worker};
pub use click_recorder::{ClickRecorder, RecordOutcome};
pub use link_resolver::LinkResolver;
pub use link_service::LinkService;
pub use redirect_service::{RedirectResponse, RedirectService};
pub use stats_service::{LinkSummary, StatsService};
