//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "example.com/some/long/path",
///   "custom_code": "promo",   // optional
///   "expires_in": 3600        // optional, seconds
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "short_url": "http://localhost:8080/promo",
///   "short_code": "promo",
///   "original_url": "https://example.com/some/long/path",
///   "expires_at": "2025-01-01T13:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request for malformed JSON, invalid URL or invalid custom code
/// - 409 Conflict if the custom code is already in use
/// - 500 Internal Server Error if no free code could be generated
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state.link_service.shorten(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_url: state.short_url(&link.code),
            short_code: link.code,
            original_url: link.target_url,
            expires_at: link.expires_at,
        }),
    ))
}
