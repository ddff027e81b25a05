//! PostgreSQL repository implementations.
//!
//! Queries are checked at runtime (`sqlx::query_as` with [`sqlx::FromRow`]
//! rows) so the crate builds without a live database.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link lookup, counter increment and mutation
//! - [`PgClickRepository`] - Click event log

pub mod pg_click_repository;
pub mod pg_link_repository;

pub use pg_click_repository::PgClickRepository;
pub use pg_link_repository::PgLinkRepository;
