//! Application layer services implementing the redirect path.
//!
//! Services consume repository traits and the typed cache, and expose the
//! operations HTTP handlers (and the dashboard that edits links) call.
//!
//! # Available Services
//!
//! - [`services::LinkResolver`] - Cache-aside short code lookup
//! - [`services::ClickQueue`] - Bounded hand-off from redirects to the click worker
//! - [`services::ClickRecorder`] - Click event logging and counter increment
//! - [`services::RedirectService`] - Resolve, answer, queue the click
//! - [`services::LinkService`] - Link edits that keep the cache coherent
//! - [`services::StatsService`] - Grouped counts computed on read

pub mod services;
