//! Link entity representing a shortened URL mapping.

use axum::http::HeaderValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::utils::upi::build_upi_uri;

/// How a link's destination is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkKind {
    /// Redirects to the stored destination URL as-is.
    Standard,
    /// Redirects to a `upi://pay` deep link built from [`UpiDetails`].
    UpiPayment,
}

impl LinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::UpiPayment => "upi-payment",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "upi-payment" => Ok(Self::UpiPayment),
            other => Err(format!("unknown link kind '{other}'")),
        }
    }
}

/// Payment fields of a UPI link. Only the VPA is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpiDetails {
    pub vpa: String,
    pub payee_name: Option<String>,
    pub amount: Option<String>,
    pub note: Option<String>,
}

/// Reasons a stored link cannot be turned into a redirect target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DestinationError {
    #[error("link has an empty destination URL")]
    EmptyDestination,
    #[error("UPI link is missing its payment details")]
    MissingUpiDetails,
    #[error("UPI link has an empty VPA")]
    EmptyVpa,
    #[error("destination cannot be sent as a Location header")]
    InvalidLocation,
}

/// A shortened URL with its redirect and preview data.
///
/// `code` is unique and never changes after creation. `clicks` only grows,
/// and only through [`crate::domain::repositories::LinkRepository::increment_clicks`].
/// The struct is serialized verbatim into the cache, so a cached copy may carry
/// a stale `clicks` value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub destination_url: String,
    pub clicks: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub kind: LinkKind,
    pub upi: Option<UpiDetails>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a standard link with no preview metadata.
    pub fn standard(id: i64, code: impl Into<String>, destination_url: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            destination_url: destination_url.into(),
            clicks: 0,
            title: None,
            description: None,
            image: None,
            kind: LinkKind::Standard,
            upi: None,
            created_at: Utc::now(),
        }
    }

    /// Creates a UPI payment link.
    pub fn upi_payment(id: i64, code: impl Into<String>, upi: UpiDetails) -> Self {
        Self {
            kind: LinkKind::UpiPayment,
            upi: Some(upi),
            ..Self::standard(id, code, "")
        }
    }

    /// Computes the URL the redirect endpoint sends the visitor to.
    ///
    /// # Errors
    ///
    /// Returns a [`DestinationError`] when the stored fields cannot produce a
    /// usable target: empty URL, UPI link without a VPA, or a value with
    /// control characters that no `Location` header can carry.
    pub fn destination(&self) -> Result<String, DestinationError> {
        let destination = match self.kind {
            LinkKind::Standard => {
                if self.destination_url.trim().is_empty() {
                    return Err(DestinationError::EmptyDestination);
                }
                self.destination_url.clone()
            }
            LinkKind::UpiPayment => {
                let upi = self
                    .upi
                    .as_ref()
                    .ok_or(DestinationError::MissingUpiDetails)?;
                build_upi_uri(upi)?
            }
        };

        HeaderValue::from_str(&destination).map_err(|_| DestinationError::InvalidLocation)?;
        Ok(destination)
    }

    /// Extracts the metadata subset that is cached under its own key.
    pub fn metadata(&self) -> LinkMetadata {
        LinkMetadata {
            title: self.title.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            kind: self.kind,
            upi: self.upi.clone(),
        }
    }
}

/// The part of a link needed for previews and redirects, without counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub kind: LinkKind,
    pub upi: Option<UpiDetails>,
}
