//! Repository trait definitions for the domain layer.
//!
//! These traits describe the system of record the redirect path consumes. The
//! schema itself belongs to the dashboard application; see `migrations/` for
//! the columns this service expects.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Link lookup, counter increment and mutation
//! - [`ClickRepository`] - Append-only click event log

pub mod click_repository;
pub mod link_repository;

pub use click_repository::ClickRepository;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
