pub mod dinosaurs;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /dinosaurs                                       list (re-fetches and re-renders)
/// /dinosaurs/{id}                                  get one from the store
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/dinosaurs", dinosaurs::api_router())
}
