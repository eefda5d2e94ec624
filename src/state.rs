//! Shared application state injected into handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::LinkService;
use crate::domain::click_event::ClickEvent;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub click_sender: mpsc::Sender<ClickEvent>,
    /// Public prefix for short URLs, without trailing slash.
    pub base_url: Arc<str>,
    /// Storage backend name reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        click_sender: mpsc::Sender<ClickEvent>,
        base_url: &str,
        storage: &'static str,
    ) -> Self {
        Self {
            link_service,
            click_sender,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            storage,
        }
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::LinkRepository;
    use crate::infrastructure::persistence::MemoryLinkRepository;
    use crate::utils::url_validator::UrlValidator;

    #[test]
    fn test_short_url_trims_trailing_slash() {
        let repo: Arc<dyn LinkRepository> = Arc::new(MemoryLinkRepository::new());
        let service = Arc::new(LinkService::new(repo, UrlValidator::default(), 6));
        let (tx, _rx) = mpsc::channel(1);

        let state = AppState::new(service, tx, "https://sho.rt/", "memory");

        assert_eq!(state.short_url("abc123"), "https://sho.rt/abc123");
    }
}
