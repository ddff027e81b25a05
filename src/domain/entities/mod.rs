//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`Link`] - A shortened URL (standard or UPI payment)
//! - [`LinkMetadata`] - The preview/redirect subset of a link that is cached separately
//! - [`ClickEvent`] - One recorded redirect
//!
//! Insert payloads follow the `New*` naming used throughout the crate
//! ([`NewClickEvent`]).

pub mod click;
pub mod link;

pub use click::{ClickEvent, DeviceClass, DeviceCount, NewClickEvent};
pub use link::{DestinationError, Link, LinkKind, LinkMetadata, UpiDetails};
