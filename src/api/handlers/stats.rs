//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns statistics for a short link.
///
/// # Endpoint
///
/// `GET /api/stats/{code}`
///
/// Expired links are still reported.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.link_service.get_stats(&code).await?;
    Ok(Json(stats.into()))
}
