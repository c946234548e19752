use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::app::catalog;
use crate::transport::http::types::{error_response, ApiResponse};

/// Shared search path for the global and user catalogs: delegate to the
/// service layer and render either the matched records or the error kind.
pub fn search_response(
    library_path: &std::path::Path,
    key: &str,
    value: &str,
    target: Option<&str>,
) -> Response {
    match catalog::find_book(key, value, library_path, target) {
        Ok(books) => (
            StatusCode::OK,
            Json(ApiResponse::ok(json!({ "books": books }))),
        )
            .into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}
