use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::shared::app_state::AppState;
use crate::shared::render;
use crate::usecases::u001_product_page::{loader, service, service::RenderedPage};

/// GET /
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let routes = loader::enumerate_routes(state.store.as_ref()).await;
    Html(render::render_index(&routes, &state.store_name))
}

/// GET /product/:slug
pub async fn product(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match service::render_product_page(&state, &slug).await {
        Ok(RenderedPage::Found(html)) => Html(html).into_response(),
        Ok(RenderedPage::NotFound(html)) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render product page {}: {}", slug, e);
            (
                StatusCode::BAD_GATEWAY,
                Html(render::render_unavailable(&state.store_name)),
            )
                .into_response()
        }
    }
}
