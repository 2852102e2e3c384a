//! Route definitions for the dinosaur list.
//!
//! Browsers only submit forms with GET and POST, so deletions are
//! `POST .../delete` actions rather than `DELETE` requests.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::dinosaurs;
use crate::state::AppState;

/// Page routes mounted at the root.
///
/// ```text
/// GET    /                                             -> index
/// POST   /dinosaurs                                    -> create_dinosaur
/// POST   /dinosaurs/{id}/delete                        -> delete_dinosaur
/// POST   /dinosaurs/{id}/features                      -> add_feature
/// POST   /dinosaurs/{id}/features/{feature_id}/delete  -> remove_feature
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dinosaurs::index))
        .route("/dinosaurs", post(dinosaurs::create_dinosaur))
        .route("/dinosaurs/{id}/delete", post(dinosaurs::delete_dinosaur))
        .route("/dinosaurs/{id}/features", post(dinosaurs::add_feature))
        .route(
            "/dinosaurs/{id}/features/{feature_id}/delete",
            post(dinosaurs::remove_feature),
        )
}

/// JSON routes mounted at `/api/v1/dinosaurs`.
///
/// ```text
/// GET    /        -> list_dinosaurs
/// GET    /{id}    -> get_dinosaur
/// ```
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/", get(dinosaurs::list_dinosaurs))
        .route("/{id}", get(dinosaurs::get_dinosaur))
}
