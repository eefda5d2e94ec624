//! Background consumer for click events.
//!
//! Click counting is eventually consistent with redirect traffic. The redirect
//! handler enqueues an event and responds immediately; this worker applies the
//! increment later. A failed increment is logged and dropped, never retried
//! and never reported to the client that was redirected. Events still queued
//! when the process crashes are lost.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;

use crate::application::services::{LinkError, LinkService};
use crate::domain::click_event::ClickEvent;

/// Consumes click events until every sender is dropped.
///
/// Each event runs [`LinkService::register_click`] in its own task, with at
/// most `concurrency` tasks in flight. Returns after the channel closes and
/// all in-flight increments finish.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    link_service: Arc<LinkService>,
    concurrency: usize,
) {
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut in_flight = JoinSet::new();

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };
        let service = link_service.clone();

        in_flight.spawn(async move {
            let _permit = permit;
            process_click(&service, event).await;
        });

        // Reap finished tasks so the set does not grow with traffic.
        while in_flight.try_join_next().is_some() {}
    }

    while in_flight.join_next().await.is_some() {}

    tracing::info!("Click worker stopped");
}

async fn process_click(service: &LinkService, event: ClickEvent) {
    match service.register_click(&event.code).await {
        Ok(()) => {
            metrics::counter!("clicks_recorded_total").increment(1);
            tracing::debug!(code = %event.code, "Click recorded");
        }
        Err(LinkError::NotFound(_) | LinkError::Expired(_)) => {
            metrics::counter!("clicks_dropped_total", "reason" => "unavailable").increment(1);
            tracing::debug!(code = %event.code, "Click dropped, link no longer available");
        }
        Err(e) => {
            metrics::counter!("clicks_dropped_total", "reason" => "error").increment(1);
            tracing::warn!(
                code = %event.code,
                occurred_at = %event.occurred_at,
                error = %e,
                "Failed to record click, dropping"
            );
        }
    }
}
