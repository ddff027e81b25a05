//! `upi://pay` deep link construction.

use crate::domain::entities::{DestinationError, UpiDetails};
use url::form_urlencoded::Serializer;

/// Builds the payment URI for a UPI link.
///
/// Parameters are emitted in the order `pa`, `pn`, `am`, `tn` and
/// form-urlencoded. Optional fields that are absent or blank are left out
/// entirely rather than sent empty.
///
/// # Errors
///
/// Returns [`DestinationError::EmptyVpa`] if the VPA is blank.
pub fn build_upi_uri(upi: &UpiDetails) -> Result<String, DestinationError> {
    let vpa = upi.vpa.trim();
    if vpa.is_empty() {
        return Err(DestinationError::EmptyVpa);
    }

    let mut query = Serializer::new(String::new());
    query.append_pair("pa", vpa);

    let optional = [
        ("pn", &upi.payee_name),
        ("am", &upi.amount),
        ("tn", &upi.note),
    ];
    for (key, value) in optional {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            query.append_pair(key, value);
        }
    }

    Ok(format!("upi://pay?{}", query.finish()))
}
