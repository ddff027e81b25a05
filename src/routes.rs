//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`  - Short link redirect
//! - `GET  /health`  - Health check: database and cache
//! - anything else   - Redirect to the home URL
//!
//! `/health` is a static route and wins over a link whose code is `health`.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Panic recovery** - A panicking redirect still answers with a redirect home

use crate::api::handlers::{health_handler, redirect_handler, unmatched_handler};
use crate::api::middleware::{panic, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    let home_url = state.redirect_service.home_url().to_string();

    let redirect_routes = Router::new()
        .route("/{code}", get(redirect_handler))
        .fallback(unmatched_handler)
        .layer(panic::layer(home_url));

    Router::new()
        .route("/health", get(health_handler))
        .merge(redirect_routes)
        .with_state(state)
        .layer(tracing::layer())
}
