use contracts::shared::page::{PageData, RouteSet};

use crate::domain::{a001_product, a002_comment};
use crate::shared::content_store::{ContentStore, ContentStoreError};

/// Перечислить маршруты страниц товаров.
///
/// Недоступное хранилище не является ошибкой: возвращается пустой набор,
/// и все страницы отрисовываются по запросу.
pub async fn enumerate_routes(store: &dyn ContentStore) -> RouteSet {
    match a001_product::repository::list_slugs(store).await {
        Ok(slugs) => {
            let routes = RouteSet::from_slugs(slugs);
            tracing::info!("Enumerated {} product routes", routes.len());
            routes
        }
        Err(e) => {
            tracing::warn!("Route enumeration failed, serving everything on demand: {}", e);
            RouteSet::default()
        }
    }
}

/// Данные страницы товара: товар и ветка комментариев.
///
/// Оба запроса выполняются независимо; страница готова, когда завершились оба.
pub async fn load_page_data(
    store: &dyn ContentStore,
    slug: &str,
) -> Result<PageData, ContentStoreError> {
    let (product, thread) = tokio::join!(
        a001_product::repository::get_by_slug(store, slug),
        a002_comment::repository::thread_for_slug(store, slug),
    );

    let Some(product) = product? else {
        tracing::debug!("Product '{}' not found", slug);
        return Ok(PageData::NotFound);
    };

    let mut thread = thread?.unwrap_or_default();
    thread
        .comments
        .retain(|c| c.product_id().map_or(true, |id| *id == product.id));

    Ok(PageData::Ready { product, thread })
}
