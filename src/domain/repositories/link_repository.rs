//! Storage contract for short links.

use crate::domain::entities::{LinkStats, ShortLink};
use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a [`LinkRepository`] implementation.
///
/// These never leave the application layer; the link service classifies
/// them into its own error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("short code '{0}' already exists")]
    DuplicateCode(String),

    #[error("short code '{0}' not found")]
    NotFound(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Repository interface for short links.
///
/// `save` is the only operation that must be linearizable against concurrent
/// writers of the same code. Everything else needs per-key atomicity only.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - sharded in-process map
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts the link if no link with the same code exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateCode`] if the code is taken, decided
    /// atomically with the insert.
    async fn save(&self, link: &ShortLink) -> Result<(), StoreError>;

    /// Fetches a link by code, expired or not.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no link has this code.
    async fn get_by_code(&self, code: &str) -> Result<ShortLink, StoreError>;

    /// Atomically adds one to the click counter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no link has this code.
    async fn increment_clicks(&self, code: &str) -> Result<(), StoreError>;

    /// Returns statistics for a link.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no link has this code.
    async fn get_stats(&self, code: &str) -> Result<LinkStats, StoreError>;

    /// Removes a link.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no link has this code.
    async fn delete_by_code(&self, code: &str) -> Result<(), StoreError>;

    /// Verifies the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
