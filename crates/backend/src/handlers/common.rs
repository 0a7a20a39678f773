use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::shared::content_store::ContentStoreError;

/// Ошибка в виде `{error, message}`
pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Хранилище контента недоступно или ответило ошибкой
pub fn store_error(context: &str, err: &ContentStoreError) -> Response {
    tracing::error!("{}: {}", context, err);
    json_error(StatusCode::BAD_GATEWAY, "content_store_error", err.to_string())
}
