//! Pure parsing helpers used on the redirect path.
//!
//! Every function here is total: any input, however malformed, maps to a
//! defined output.
//!
//! - [`client_ip`] - Client address from forwarded headers
//! - [`user_agent`] - Device / OS / browser classification
//! - [`referrer`] - Referrer normalization
//! - [`upi`] - `upi://pay` deep link construction

pub mod client_ip;
pub mod referrer;
pub mod upi;
pub mod user_agent;

/// Placeholder stored when a value cannot be determined.
pub const UNKNOWN: &str = "Unknown";
