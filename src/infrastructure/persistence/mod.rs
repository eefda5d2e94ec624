//! Link repository implementations.
//!
//! - [`MemoryLinkRepository`] - sharded in-process map, used when no database is configured
//! - [`PgLinkRepository`] - PostgreSQL storage via SQLx

pub mod memory_link_repository;
pub mod pg_link_repository;

pub use memory_link_repository::MemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
