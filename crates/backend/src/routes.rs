use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::shared::app_state::AppState;

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // API
        // ========================================
        .route(
            "/api/product/routes",
            get(handlers::a001_product::list_routes),
        )
        .route(
            "/api/product/:slug",
            get(handlers::a001_product::get_by_slug),
        )
        .route("/api/comment", post(handlers::a002_comment::create))
        // ========================================
        // PAGES
        // ========================================
        .route("/", get(handlers::pages::index))
        .route("/product/:slug", get(handlers::pages::product))
        .with_state(state)
}
