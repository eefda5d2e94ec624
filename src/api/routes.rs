//! API route configuration.

use crate::api::handlers::{delete_link_handler, shorten_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Management API, nested under `/api`.
///
/// # Endpoints
///
/// - `POST   /shorten`       - Create a short link
/// - `GET    /stats/{code}`  - Statistics for a link
/// - `DELETE /urls/{code}`   - Delete a link
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/stats/{code}", get(stats_handler))
        .route("/urls/{code}", delete(delete_link_handler))
}
