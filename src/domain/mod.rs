//! Domain layer containing business entities and repository contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Storage trait definitions
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click processing worker
//!
//! # Click Processing Flow
//!
//! 1. Redirect handler resolves the code and responds
//! 2. [`click_event::ClickEvent`] is sent to a bounded channel
//! 3. [`click_worker::run_click_worker`] re-resolves and increments the counter
//! 4. Failures are logged and dropped

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
