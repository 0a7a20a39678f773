use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::page::{PageData, ProductPagePayload};
use serde_json::json;

use super::common::store_error;
use crate::shared::app_state::AppState;
use crate::usecases::u001_product_page::loader;

/// GET /api/product/routes
pub async fn list_routes(State(state): State<AppState>) -> Json<serde_json::Value> {
    let routes = loader::enumerate_routes(state.store.as_ref()).await;
    let items: Vec<serde_json::Value> = routes
        .routes
        .iter()
        .map(|r| json!({ "slug": r.slug, "path": r.path() }))
        .collect();

    Json(json!({
        "routes": items,
        "fallback": routes.fallback,
    }))
}

/// GET /api/product/:slug
pub async fn get_by_slug(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match loader::load_page_data(state.store.as_ref(), &slug).await {
        Ok(PageData::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Product '{}' not found", slug),
                "no_data": true,
            })),
        )
            .into_response(),
        Ok(page) => Json(ProductPagePayload {
            page,
            media: state.media.clone(),
            store_name: state.store_name.clone(),
            ack_window_ms: state.ack_window_ms,
        })
        .into_response(),
        Err(e) => store_error("Failed to load product page data", &e),
    }
}
