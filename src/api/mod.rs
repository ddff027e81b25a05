//! HTTP layer: handlers, response DTOs and middleware.
//!
//! # Modules
//!
//! - [`dto`] - Response serialization for the JSON endpoints
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing and panic recovery

pub mod dto;
pub mod handlers;
pub mod middleware;
