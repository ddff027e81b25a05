//! Domain layer containing business entities and pure request parsing.
//!
//! This module defines the data the redirect path works with and the repository
//! interfaces it consumes, independent of PostgreSQL, Redis or Axum.
//!
//! # Architecture
//!
//! - [`entities`] - Links, click events and their derived views
//! - [`repositories`] - Data access trait definitions
//! - [`request_context`] - Immutable snapshot of the headers a click is parsed from
//!
//! # Click Processing Flow
//!
//! 1. HTTP handler builds a [`request_context::RequestContext`]
//! 2. [`crate::application::services::RedirectService`] resolves the link and answers
//! 3. The click is queued and [`crate::application::services::ClickRecorder`] runs on the worker
//! 4. Click data is persisted via [`repositories::ClickRepository`] and the counter
//!    is bumped via [`repositories::LinkRepository::increment_clicks`]

pub mod entities;
pub mod repositories;
pub mod request_context;

pub use request_context::RequestContext;
