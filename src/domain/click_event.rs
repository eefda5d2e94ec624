//! Click event model for asynchronous click tracking.

use chrono::{DateTime, Utc};

/// A redirect that should be counted.
///
/// Sent from the redirect handler to the background worker over a bounded
/// channel so the redirect response never waits on the counter update.
/// Processed by [`crate::domain::click_worker::run_click_worker`].
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub code: String,
    pub occurred_at: DateTime<Utc>,
}

impl ClickEvent {
    /// Creates a click event stamped with the current time.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            occurred_at: Utc::now(),
        }
    }
}
