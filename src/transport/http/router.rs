use crate::transport::http::handlers::{global, health, progress, user};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::routing::{get, patch, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        global::list_global_handler,
        global::search_global_handler,
        global::search_global_projected_handler,
        global::add_global_handler,
        user::list_user_handler,
        user::search_user_handler,
        user::search_user_projected_handler,
        user::add_user_handler,
        user::remove_user_handler,
        progress::top_book_handler,
        progress::last_read_handler,
        progress::change_page_handler
    ),
    components(schemas(ApiResponse))
)]
#[allow(dead_code)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/global/books",
            get(global::list_global_handler).post(global::add_global_handler),
        )
        .route(
            "/global/books/search/:key/:value",
            get(global::search_global_handler),
        )
        .route(
            "/global/books/search/:key/:value/:target",
            get(global::search_global_projected_handler),
        )
        .route("/user/books", get(user::list_user_handler))
        .route("/user/books/last-read", get(progress::last_read_handler))
        .route("/user/books/top/:target", get(progress::top_book_handler))
        .route(
            "/user/books/:uuid",
            post(user::add_user_handler).delete(user::remove_user_handler),
        )
        .route(
            "/user/books/search/:key/:value",
            get(user::search_user_handler),
        )
        .route(
            "/user/books/search/:key/:value/:target",
            get(user::search_user_projected_handler),
        )
        .route(
            "/user/books/:uuid/page/:page_number",
            patch(progress::change_page_handler),
        )
        .with_state(app_state)
}
