//! Handlers for reading-progress queries and updates.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::app::catalog;
use crate::transport::http::types::{error_response, ApiResponse, AppState};

#[utoipa::path(
    get,
    path = "/user/books/top/{target}",
    params(
        ("target" = String, Path, description = "Attribute to rank by (allow-listed)")
    ),
    responses(
        (status = 200, description = "Book with the maximum target value", body = ApiResponse),
        (status = 400, description = "Target invalid or carried by no book", body = ApiResponse),
        (status = 404, description = "User catalog is empty", body = ApiResponse)
    )
)]
pub async fn top_book_handler(
    State(state): State<AppState>,
    Path(target): Path<String>,
) -> impl IntoResponse {
    match catalog::find_top_book(&state.user_path, &target) {
        Ok(book) => (
            StatusCode::OK,
            Json(ApiResponse::ok(json!({ "book": book }))),
        )
            .into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/user/books/last-read",
    responses(
        (status = 200, description = "Most recently read book", body = ApiResponse),
        (status = 400, description = "No book has been read yet", body = ApiResponse),
        (status = 404, description = "User catalog is empty", body = ApiResponse)
    )
)]
pub async fn last_read_handler(State(state): State<AppState>) -> impl IntoResponse {
    match catalog::find_top_book(&state.user_path, "last_read_date") {
        Ok(book) => (
            StatusCode::OK,
            Json(ApiResponse::ok(json!({ "book": book }))),
        )
            .into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

#[utoipa::path(
    patch,
    path = "/user/books/{uuid}/page/{page_number}",
    params(
        ("uuid" = String, Path, description = "Identity of the user-catalog book"),
        ("page_number" = String, Path, description = "New last-read page (positive integer)")
    ),
    responses(
        (status = 200, description = "Progress recorded; body carries the updated record", body = ApiResponse),
        (status = 400, description = "Page number not a positive integer within the book", body = ApiResponse),
        (status = 404, description = "Unknown uuid in the user catalog", body = ApiResponse),
        (status = 500, description = "Persisted state does not reflect the update", body = ApiResponse)
    )
)]
pub async fn change_page_handler(
    State(state): State<AppState>,
    Path((uuid, page_number)): Path<(String, String)>,
) -> impl IntoResponse {
    let page: i64 = match page_number.parse() {
        Ok(n) => n,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::err("Page number must be an integer.")),
            )
                .into_response();
        }
    };

    match catalog::change_page(&uuid, page, &state.user_path) {
        Ok(book) => (
            StatusCode::OK,
            Json(ApiResponse::ok(json!({ "book": book }))),
        )
            .into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}
