use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use dinodex_core::error::{CoreError, RequestError};
use serde_json::json;

use crate::render;

/// Application-level error type for HTTP handlers.
///
/// JSON endpoints use [`AppError::Core`]; page endpoints use
/// [`AppError::Page`], which carries the last rendered list so the user
/// still sees it, with the error shown above.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `dinodex_core`, answered as JSON.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failed page action, answered as the full HTML page plus a notice.
    #[error("{error}")]
    Page { error: CoreError, list_html: String },
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Core(core) => {
                let (status, code, message) = classify(&core);
                let body = json!({
                    "error": message,
                    "code": code,
                });
                (status, axum::Json(body)).into_response()
            }
            AppError::Page { error, list_html } => {
                let (status, _, message) = classify(&error);
                let page = render::render_page(&list_html, Some(&message));
                (status, Html(page)).into_response()
            }
        }
    }
}

/// Map a [`CoreError`] to an HTTP status, error code, and user-facing message.
///
/// - Missing records (locally or in the store) map to 404.
/// - Any other store failure maps to 502: the remote did not do its job.
fn classify(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} is not in the current list"),
        ),
        CoreError::Request(RequestError::NotFound { id }) => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("Dinosaur with id {id} no longer exists in the record store"),
        ),
        CoreError::Request(req) => (
            StatusCode::BAD_GATEWAY,
            "STORE_UNAVAILABLE",
            format!("The record store request failed: {req}"),
        ),
    }
}
