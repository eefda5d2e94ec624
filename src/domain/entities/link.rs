//! Short link entity and its statistics projection.

use chrono::{DateTime, Duration, Utc};

/// A mapping from a short code to a target URL.
///
/// `code` is the identity. Only `click_count` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub code: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub click_count: i64,
}

impl ShortLink {
    /// Creates a fresh link with a zero click count.
    ///
    /// `expires_at` is set only for a positive `ttl_seconds`; zero, negative
    /// or missing TTLs produce a link that never expires.
    pub fn new(code: String, target_url: String, ttl_seconds: Option<i64>) -> Self {
        let created_at = Utc::now();
        let expires_at = ttl_seconds
            .filter(|ttl| *ttl > 0)
            .and_then(Duration::try_seconds)
            .and_then(|ttl| created_at.checked_add_signed(ttl));

        Self {
            code,
            target_url,
            created_at,
            expires_at,
            click_count: 0,
        }
    }

    /// Returns true if the link had expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }

    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Statistics for a single link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStats {
    pub code: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub click_count: i64,
}

impl From<&ShortLink> for LinkStats {
    fn from(link: &ShortLink) -> Self {
        Self {
            code: link.code.clone(),
            target_url: link.target_url.clone(),
            created_at: link.created_at,
            expires_at: link.expires_at,
            click_count: link.click_count,
        }
    }
}
