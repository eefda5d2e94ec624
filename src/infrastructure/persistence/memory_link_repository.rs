//! In-process implementation of the link repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::{LinkStats, ShortLink};
use crate::domain::repositories::{LinkRepository, StoreError};

/// Link storage backed by a sharded concurrent map.
///
/// Each operation locks only the shard that owns the code, so requests for
/// different codes rarely contend. Reads hand out clones; no guard escapes
/// a method. Expired links are kept and returned; filtering them is the
/// service's job.
#[derive(Debug, Default)]
pub struct MemoryLinkRepository {
    links: DashMap<String, ShortLink>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links, expired ones included.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn save(&self, link: &ShortLink) -> Result<(), StoreError> {
        // The shard write lock is held across the occupancy check and the insert.
        match self.links.entry(link.code.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateCode(link.code.clone())),
            Entry::Vacant(slot) => {
                slot.insert(link.clone());
                Ok(())
            }
        }
    }

    async fn get_by_code(&self, code: &str) -> Result<ShortLink, StoreError> {
        self.links
            .get(code)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound(code.to_string()))
    }

    async fn increment_clicks(&self, code: &str) -> Result<(), StoreError> {
        let mut entry = self
            .links
            .get_mut(code)
            .ok_or_else(|| StoreError::NotFound(code.to_string()))?;

        entry.click_count += 1;
        Ok(())
    }

    async fn get_stats(&self, code: &str) -> Result<LinkStats, StoreError> {
        self.links
            .get(code)
            .map(|entry| LinkStats::from(entry.value()))
            .ok_or_else(|| StoreError::NotFound(code.to_string()))
    }

    async fn delete_by_code(&self, code: &str) -> Result<(), StoreError> {
        self.links
            .remove(code)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(code.to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
