//! Handlers for the dinosaur list.
//!
//! Every page handler runs one synchronizer operation and answers with the
//! freshly rendered page. On failure the last rendered list is shown again
//! with an error notice (see [`AppError::Page`]).

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};
use axum::{Form, Json};
use dinodex_core::error::CoreError;
use dinodex_core::model::{NewDinosaur, NewFeature};

use crate::error::{AppError, AppResult};
use crate::render;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::sync::RenderedView;

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// GET /
///
/// Re-fetch the whole collection and render the page.
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let result = state.sync.refresh_all().await;
    page(&state, result).await
}

/// POST /dinosaurs
///
/// Create a dinosaur from the four form fields.
pub async fn create_dinosaur(
    State(state): State<AppState>,
    Form(input): Form<NewDinosaur>,
) -> AppResult<Html<String>> {
    let result = state.sync.create_entity(input).await;
    page(&state, result).await
}

/// POST /dinosaurs/{id}/delete
pub async fn delete_dinosaur(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let result = state.sync.remove_entity(&id).await;
    page(&state, result).await
}

/// POST /dinosaurs/{id}/features
///
/// Append a body part and color to the dinosaur.
pub async fn add_feature(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<NewFeature>,
) -> AppResult<Html<String>> {
    let result = state.sync.add_feature_to(&id, input).await;
    page(&state, result).await
}

/// POST /dinosaurs/{id}/features/{feature_id}/delete
pub async fn remove_feature(
    State(state): State<AppState>,
    Path((id, feature_id)): Path<(String, String)>,
) -> AppResult<Html<String>> {
    let result = state.sync.remove_feature_from(&id, &feature_id).await;
    page(&state, result).await
}

/// Turn a synchronizer result into the page response.
async fn page(
    state: &AppState,
    result: Result<RenderedView, CoreError>,
) -> AppResult<Html<String>> {
    match result {
        Ok(view) => Ok(Html(render::render_page(&view.html, None))),
        Err(error) => Err(AppError::Page {
            error,
            list_html: state.sync.current_view().await.html,
        }),
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// GET /api/v1/dinosaurs
///
/// Re-fetch the collection (updating the displayed view) and return it.
pub async fn list_dinosaurs(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let view = state.sync.refresh_all().await?;

    Ok(Json(DataResponse { data: view.entities }))
}

/// GET /api/v1/dinosaurs/{id}
///
/// Fetch a single record from the store.
pub async fn get_dinosaur(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let dinosaur = state.sync.fetch_one(&id).await?;

    Ok(Json(DataResponse { data: dinosaur }))
}
