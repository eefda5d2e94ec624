#![allow(dead_code)]

use chrono::{Duration, Utc};
use shortlink::application::services::LinkService;
use shortlink::domain::click_event::ClickEvent;
use shortlink::domain::entities::ShortLink;
use shortlink::domain::repositories::LinkRepository;
use shortlink::infrastructure::persistence::MemoryLinkRepository;
use shortlink::state::AppState;
use shortlink::utils::url_validator::UrlValidator;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const BASE_URL: &str = "http://sho.rt";

/// State over a fresh in-memory store.
///
/// The click receiver is returned so tests can observe enqueued events
/// instead of running the worker.
pub fn create_test_state() -> (
    AppState,
    Arc<MemoryLinkRepository>,
    mpsc::Receiver<ClickEvent>,
) {
    let repository = Arc::new(MemoryLinkRepository::new());
    let service = Arc::new(LinkService::new(
        repository.clone() as Arc<dyn LinkRepository>,
        UrlValidator::default(),
        6,
    ));
    let (tx, rx) = mpsc::channel(100);
    let state = AppState::new(service, tx, BASE_URL, "memory");
    (state, repository, rx)
}

pub async fn create_test_link(repository: &MemoryLinkRepository, code: &str, url: &str) {
    let link = ShortLink::new(code.to_string(), url.to_string(), None);
    repository.save(&link).await.unwrap();
}

pub async fn create_expired_link(repository: &MemoryLinkRepository, code: &str, url: &str) {
    let mut link = ShortLink::new(code.to_string(), url.to_string(), None);
    link.created_at = Utc::now() - Duration::hours(2);
    link.expires_at = Some(Utc::now() - Duration::hours(1));
    repository.save(&link).await.unwrap();
}
