//! Handler for link deletion.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::message::MessageResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Deletes a short link.
///
/// # Endpoint
///
/// `DELETE /api/urls/{code}`
///
/// Works on expired links too. Deletion is permanent; the code becomes
/// available for reuse.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.link_service.delete(&code).await?;
    Ok(Json(MessageResponse::new("URL deleted successfully")))
}
