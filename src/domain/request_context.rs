//! Immutable snapshot of the request data a click is parsed from.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Headers and peer address captured from a redirect request.
///
/// Every field is optional; parsing never fails because something is missing.
/// Built once in the handler and moved into the background click task, so the
/// recorder never touches the live request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub forwarded_for: Option<String>,
    pub direct_ip: Option<IpAddr>,
}

impl RequestContext {
    /// Captures the relevant headers. Values that are not valid visible ASCII
    /// are dropped.
    pub fn from_headers(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Self {
        let get = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        Self {
            user_agent: get(header::USER_AGENT.as_str()),
            referer: get(header::REFERER.as_str()),
            forwarded_for: get(X_FORWARDED_FOR),
            direct_ip,
        }
    }
}
