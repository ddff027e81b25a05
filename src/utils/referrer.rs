//! Referrer normalization.

/// Value some clients send when there is no referring page.
const DIRECT: &str = "Direct";

/// Returns the referrer to store, or `None` for direct traffic.
///
/// Absent, blank and `"Direct"` values all mean the visit had no referrer.
pub fn normalize_referrer(referer: Option<&str>) -> Option<String> {
    let referer = referer?.trim();
    if referer.is_empty() || referer == DIRECT {
        return None;
    }
    Some(referer.to_string())
}
