//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, Request, State, rejection::PathRejection},
    response::Redirect,
};
use std::net::SocketAddr;
use tracing::debug;

use crate::domain::RequestContext;
use crate::state::AppState;

/// Redirects a short code to its destination.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Capture User-Agent, Referer, X-Forwarded-For and the peer address
/// 2. Resolve the code (cache first, then database)
/// 3. Spawn click recording without waiting for it
/// 4. Return 307 Temporary Redirect
///
/// # Responses
///
/// Always `307`. The `Location` is the link's destination, or the home URL
/// when the code is unknown, malformed, or anything on the way fails.
pub async fn redirect_handler(
    State(state): State<AppState>,
    code: Result<Path<String>, PathRejection>,
    request: Request,
) -> Redirect {
    let service = &state.redirect_service;

    let Ok(Path(code)) = code else {
        debug!("Unparseable short code path, redirecting home");
        return Redirect::temporary(service.home_url());
    };

    let direct_ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let ctx = RequestContext::from_headers(request.headers(), direct_ip);

    let response = service.handle(&code, ctx).await;
    Redirect::temporary(response.location())
}

/// Sends `/` and paths that can never be a short code (`/a/b`, ...) home.
pub async fn unmatched_handler(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(state.redirect_service.home_url())
}
