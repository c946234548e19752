//! Handlers for the global-catalog routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value as JsonValue};

use crate::app::catalog;
use crate::transport::http::handlers::common::search_response;
use crate::transport::http::types::{error_response, json_422, ApiResponse, AppState};

#[utoipa::path(
    get,
    path = "/global/books",
    responses(
        (status = 200, description = "Every book in the global catalog", body = ApiResponse)
    )
)]
pub async fn list_global_handler(State(state): State<AppState>) -> impl IntoResponse {
    let books = catalog::list_books(&state.global_path);
    (
        StatusCode::OK,
        Json(ApiResponse::ok(json!({ "books": books }))),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/global/books/search/{key}/{value}",
    params(
        ("key" = String, Path, description = "Attribute to search by (allow-listed)"),
        ("value" = String, Path, description = "Query value; substring match except for uuid")
    ),
    responses(
        (status = 200, description = "Matching books", body = ApiResponse),
        (status = 400, description = "Key not in the allow-list", body = ApiResponse),
        (status = 404, description = "No books match", body = ApiResponse)
    )
)]
pub async fn search_global_handler(
    State(state): State<AppState>,
    Path((key, value)): Path<(String, String)>,
) -> impl IntoResponse {
    search_response(&state.global_path, &key, &value, None)
}

#[utoipa::path(
    get,
    path = "/global/books/search/{key}/{value}/{target}",
    params(
        ("key" = String, Path, description = "Attribute to search by (allow-listed)"),
        ("value" = String, Path, description = "Query value; substring match except for uuid"),
        ("target" = String, Path, description = "Attribute each match is projected down to")
    ),
    responses(
        (status = 200, description = "Projected matches", body = ApiResponse),
        (status = 400, description = "Key or target not in the allow-list", body = ApiResponse),
        (status = 404, description = "No books match", body = ApiResponse)
    )
)]
pub async fn search_global_projected_handler(
    State(state): State<AppState>,
    Path((key, value, target)): Path<(String, String, String)>,
) -> impl IntoResponse {
    search_response(&state.global_path, &key, &value, Some(&target))
}

#[utoipa::path(
    post,
    path = "/global/books",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Book ingested with a fresh uuid", body = ApiResponse),
        (status = 400, description = "Record shape invalid (missing/extra keys)", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn add_global_handler(
    State(state): State<AppState>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> impl IntoResponse {
    let Json(record) = match body {
        Ok(v) => v,
        Err(e) => return json_422(e, "a flat book record").into_response(),
    };

    match catalog::add_book_to_global(&record, &state.global_path) {
        Ok(book) => (
            StatusCode::OK,
            Json(ApiResponse::ok(json!({ "book": book }))),
        )
            .into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}
