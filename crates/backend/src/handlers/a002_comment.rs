use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::domain::a002_comment::aggregate::CreateCommentRequest;

use super::common::{json_error, store_error};
use crate::domain::a002_comment::service::{self, SubmitCommentError};
use crate::shared::app_state::AppState;

/// POST /api/comment
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!("Rejected comment body: {}", rejection.body_text());
            return json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text());
        }
    };

    match service::submit(state.store.as_ref(), request).await {
        Ok(response) => Json(response).into_response(),
        Err(SubmitCommentError::Validation(e)) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string())
        }
        Err(e @ SubmitCommentError::UnknownProduct(_)) => {
            json_error(StatusCode::NOT_FOUND, "not_found", e.to_string())
        }
        Err(SubmitCommentError::Store(e)) => store_error("Failed to create comment", &e),
    }
}
