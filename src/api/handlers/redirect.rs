//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tokio::sync::mpsc::error::TrySendError;

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Click Tracking
///
/// After a successful lookup a [`ClickEvent`] is pushed onto the bounded
/// click queue without waiting; the response does not depend on the counter
/// update. When the queue is full the click is dropped and logged, so counts
/// are eventually consistent with redirect traffic, not exact.
///
/// # Errors
///
/// - 404 Not Found if the short code doesn't exist
/// - 410 Gone if the link has expired
/// - 500 Internal Server Error if the stored target cannot be sent as a header
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let link = state.link_service.resolve(&code).await?;
    let location = HeaderValue::from_str(&link.target_url).map_err(|e| {
        tracing::error!(code = %code, error = %e, "Stored target is not a valid Location header");
        AppError::internal("Internal server error", json!({}))
    })?;

    match state.click_sender.try_send(ClickEvent::new(link.code)) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            metrics::counter!("clicks_dropped_total", "reason" => "queue_full").increment(1);
            tracing::warn!(code = %event.code, "Click queue full, dropping click");
        }
        Err(TrySendError::Closed(event)) => {
            metrics::counter!("clicks_dropped_total", "reason" => "queue_closed").increment(1);
            tracing::warn!(code = %event.code, "Click queue closed, dropping click");
        }
    }

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
