//! Handlers for the user-catalog routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::app::catalog;
use crate::transport::http::handlers::common::search_response;
use crate::transport::http::types::{error_response, ApiResponse, AppState};

#[utoipa::path(
    get,
    path = "/user/books",
    responses(
        (status = 200, description = "Every book in the user catalog", body = ApiResponse)
    )
)]
pub async fn list_user_handler(State(state): State<AppState>) -> impl IntoResponse {
    let books = catalog::list_books(&state.user_path);
    (
        StatusCode::OK,
        Json(ApiResponse::ok(json!({ "books": books }))),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/user/books/search/{key}/{value}",
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
pub async fn search_user_handler(
    State(state): State<AppState>,
    Path((key, value)): Path<(String, String)>,
) -> impl IntoResponse {
    search_response(&state.user_path, &key, &value, None)
}

#[utoipa::path(
    get,
    path = "/user/books/search/{key}/{value}/{target}",
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
pub async fn search_user_projected_handler(
    State(state): State<AppState>,
    Path((key, value, target)): Path<(String, String, String)>,
) -> impl IntoResponse {
    search_response(&state.user_path, &key, &value, Some(&target))
}

#[utoipa::path(
    post,
    path = "/user/books/{uuid}",
    params(
        ("uuid" = String, Path, description = "Identity of the global-catalog book to copy")
    ),
    responses(
        (status = 200, description = "Book copied into the user catalog", body = ApiResponse),
        (status = 404, description = "Unknown uuid in the global catalog", body = ApiResponse),
        (status = 409, description = "Book already in the user catalog", body = ApiResponse)
    )
)]
pub async fn add_user_handler(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> impl IntoResponse {
    match catalog::add_book_to_user(&uuid, &state.global_path, &state.user_path) {
        Ok(book) => (
            StatusCode::OK,
            Json(ApiResponse::ok(json!({ "book": book }))),
        )
            .into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/user/books/{uuid}",
    params(
        ("uuid" = String, Path, description = "Identity of the user-catalog book to remove")
    ),
    responses(
        (status = 200, description = "Book removed; body carries its last record", body = ApiResponse),
        (status = 404, description = "Unknown uuid in the user catalog", body = ApiResponse)
    )
)]
pub async fn remove_user_handler(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> impl IntoResponse {
    match catalog::remove_book_from_user(&uuid, &state.user_path) {
        Ok(book) => (
            StatusCode::OK,
            Json(ApiResponse::ok(json!({ "book": book }))),
        )
            .into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}
