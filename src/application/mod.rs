//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers, the click worker and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link allocation, resolution and click counting

pub mod services;
