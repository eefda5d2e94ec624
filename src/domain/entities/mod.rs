//! Core domain entities.
//!
//! - [`ShortLink`] - the persisted code to URL mapping
//! - [`LinkStats`] - read-only statistics view of a link

pub mod link;

pub use link::{LinkStats, ShortLink};
