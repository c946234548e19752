use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::storage::Library;
use crate::transport::http::types::{ApiResponse, AppState};

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy (libraries readable)", body = ApiResponse)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> impl IntoResponse {
    // An unreadable file degrades to an empty library, never a failure.
    let global = Library::load(state.global_path.as_path());
    let user = Library::load(state.user_path.as_path());

    (
        StatusCode::OK,
        Json(ApiResponse::ok(serde_json::json!({
            "status": "ok",
            "global_books": global.len(),
            "user_books": user.len(),
        }))),
    )
        .into_response()
}
