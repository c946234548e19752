use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

use crate::domain::CatalogError;

/// Shared handler state: the two catalog paths. Libraries are constructed
/// fresh per operation, so no storage handle outlives a request.
#[derive(Clone)]
pub struct AppState {
    pub global_path: Arc<PathBuf>,
    pub user_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(global_path: impl Into<PathBuf>, user_path: impl Into<PathBuf>) -> AppState {
        AppState {
            global_path: Arc::new(global_path.into()),
            user_path: Arc::new(user_path.into()),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(data: JsonValue) -> ApiResponse {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> ApiResponse {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Status selection is the transport's whole error-handling job: the core
/// reports kinds, this maps them onto codes.
pub fn error_response(err: &CatalogError) -> (StatusCode, Json<ApiResponse>) {
    let status = match err {
        CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::Duplicate(_) => StatusCode::CONFLICT,
        CatalogError::Update(_) | CatalogError::Storage { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ApiResponse::err(err.to_string())))
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse::err(format!(
            "Invalid JSON body: {} (expected: {})",
            err, expected
        ))),
    )
}
