//! Panic recovery for the redirect route.

use axum::body::Body;
use axum::http::Response;
use axum::response::{IntoResponse, Redirect};
use std::any::Any;
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};
use tracing::error;

/// Answers a panicking request with a redirect home instead of a 500.
#[derive(Debug, Clone)]
pub struct RedirectHomeOnPanic {
    home_url: String,
}

impl ResponseForPanic for RedirectHomeOnPanic {
    type ResponseBody = Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response<Body> {
        let message = err
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| err.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());

        error!(panic = %message, "Redirect handler panicked, redirecting home");
        Redirect::temporary(&self.home_url).into_response()
    }
}

/// Layer for the redirect routes. Requires `panic = "unwind"`.
pub fn layer(home_url: impl Into<String>) -> CatchPanicLayer<RedirectHomeOnPanic> {
    CatchPanicLayer::custom(RedirectHomeOnPanic {
        home_url: home_url.into(),
    })
}
