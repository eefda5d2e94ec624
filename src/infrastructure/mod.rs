//! Infrastructure layer for external integrations.
//!
//! Implements the storage contract defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - In-memory and PostgreSQL repository implementations

pub mod persistence;
