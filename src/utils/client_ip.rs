//! Client IP extraction.

use crate::domain::RequestContext;
use crate::utils::UNKNOWN;

/// Best-effort client address for analytics.
///
/// Takes the first comma-separated entry of `X-Forwarded-For`, then the
/// peer address of the connection, then `"Unknown"`. The forwarded value is
/// not validated as an IP; it is stored as the proxy sent it.
///
/// # Examples
///
/// ```ignore
/// let ctx = RequestContext {
///     forwarded_for: Some("203.0.113.7, 10.0.0.1".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(client_ip(&ctx), "203.0.113.7");
/// ```
pub fn client_ip(ctx: &RequestContext) -> String {
    let forwarded = ctx
        .forwarded_for
        .as_deref()
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    match (forwarded, ctx.direct_ip) {
        (Some(ip), _) => ip.to_string(),
        (None, Some(ip)) => ip.to_string(),
        (None, None) => UNKNOWN.to_string(),
    }
}
