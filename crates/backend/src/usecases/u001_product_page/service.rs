use contracts::shared::page::PageData;
use contracts::shared::page_view::{PageUiState, ProductPageView};

use super::loader;
use crate::shared::app_state::AppState;
use crate::shared::content_store::ContentStoreError;
use crate::shared::render;

/// Отрисованная страница товара
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedPage {
    Found(String),
    NotFound(String),
}

/// Страница товара: из кэша, если свежая, иначе отрисовка по запросу
pub async fn render_product_page(
    state: &AppState,
    slug: &str,
) -> Result<RenderedPage, ContentStoreError> {
    if let Some(html) = state.pages.get_fresh(slug).await {
        return Ok(RenderedPage::Found(html));
    }

    let page = loader::load_page_data(state.store.as_ref(), slug).await?;
    let html = render_page_data(state, &page);

    if page.is_not_found() {
        return Ok(RenderedPage::NotFound(html));
    }

    state.pages.insert(slug, html.clone()).await;
    Ok(RenderedPage::Found(html))
}

pub fn render_page_data(state: &AppState, page: &PageData) -> String {
    let view = ProductPageView::build(page, &PageUiState::default(), &state.media, &state.store_name);
    render::render_product_page(&view)
}

/// Отрисовать заранее все известные маршруты.
///
/// Ошибка одной страницы не прерывает остальные: такая страница будет
/// отрисована при первом запросе.
pub async fn prerender_all(state: &AppState) -> usize {
    let routes = loader::enumerate_routes(state.store.as_ref()).await;
    let mut rendered = 0;

    for route in &routes.routes {
        match render_product_page(state, &route.slug).await {
            Ok(RenderedPage::Found(_)) => rendered += 1,
            Ok(RenderedPage::NotFound(_)) => {
                tracing::warn!("Route {} disappeared during prerender", route.path())
            }
            Err(e) => tracing::warn!("Prerender of {} failed: {}", route.path(), e),
        }
    }

    tracing::info!("Prerendered {} of {} product pages", rendered, routes.len());
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::content_store::{ContentStore, InMemoryContentStore};
    use crate::usecases::u001_product_page::PageCache;
    use contracts::shared::media::ImageUrlBuilder;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn state(store: Arc<InMemoryContentStore>) -> AppState {
        AppState {
            store,
            pages: Arc::new(PageCache::new(Duration::from_secs(60))),
            media: ImageUrlBuilder::new("proj", "production"),
            store_name: "Shop".to_string(),
            ack_window_ms: 5_000,
        }
    }

    fn seeded() -> Arc<InMemoryContentStore> {
        Arc::new(InMemoryContentStore::with_documents(vec![
            json!({"_id": "p1", "_type": "product", "name": "Red Shoes", "slug": {"current": "red-shoes"}}),
            json!({"_id": "p2", "_type": "product", "name": "Blue Hat", "slug": {"current": "blue-hat"}}),
        ]))
    }

    #[tokio::test]
    async fn test_prerender_caches_every_route() {
        let state = state(seeded());
        assert_eq!(prerender_all(&state).await, 2);
        assert_eq!(state.pages.len().await, 2);
    }

    #[tokio::test]
    async fn test_cached_page_hides_new_comment_until_revalidated() {
        let store = seeded();
        let state = state(store.clone());

        let RenderedPage::Found(before) = render_product_page(&state, "red-shoes").await.unwrap()
        else {
            panic!("expected page");
        };

        store
            .create(json!({"_type": "comment", "username": "Ada", "comment": "Fresh", "product": {"_type": "reference", "_ref": "p1"}}))
            .await
            .unwrap();

        let RenderedPage::Found(cached) = render_product_page(&state, "red-shoes").await.unwrap()
        else {
            panic!("expected page");
        };
        assert_eq!(before, cached);

        state.pages.invalidate("red-shoes").await;
        let RenderedPage::Found(after) = render_product_page(&state, "red-shoes").await.unwrap()
        else {
            panic!("expected page");
        };
        assert!(after.contains("Fresh"));
    }

    #[tokio::test]
    async fn test_not_found_is_not_cached() {
        let state = state(seeded());
        let page = render_product_page(&state, "missing").await.unwrap();

        assert!(matches!(page, RenderedPage::NotFound(_)));
        assert_eq!(state.pages.len().await, 0);
    }
}
