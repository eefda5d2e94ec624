//! DTO for link statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::domain::entities::LinkStats;

/// Statistics for a single short link.
#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub click_count: i64,
}

impl From<LinkStats> for StatsResponse {
    fn from(stats: LinkStats) -> Self {
        Self {
            short_code: stats.code,
            original_url: stats.target_url,
            created_at: stats.created_at,
            expires_at: stats.expires_at,
            click_count: stats.click_count,
        }
    }
}
