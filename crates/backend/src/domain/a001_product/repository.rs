use contracts::domain::a001_product::aggregate::Product;
use serde::Deserialize;
use serde_json::Value;

use crate::shared::content_store::{fetch_as, query, ContentStore, ContentStoreError};

#[derive(Deserialize)]
struct SlugRow {
    slug: Option<SlugValue>,
}

#[derive(Deserialize)]
struct SlugValue {
    current: Option<String>,
}

/// Все slug товаров (порядок: как вернуло хранилище)
pub async fn list_slugs(store: &dyn ContentStore) -> Result<Vec<String>, ContentStoreError> {
    let rows: Option<Vec<SlugRow>> = fetch_as(store, &query::product_slugs()).await?;
    Ok(rows
        .unwrap_or_default()
        .into_iter()
        .filter_map(|row| row.slug.and_then(|s| s.current))
        .collect())
}

/// Первый товар с точно совпадающим slug
pub async fn get_by_slug(
    store: &dyn ContentStore,
    slug: &str,
) -> Result<Option<Product>, ContentStoreError> {
    fetch_as(store, &query::product_by_slug(slug)).await
}

pub async fn exists(store: &dyn ContentStore, id: &str) -> Result<bool, ContentStoreError> {
    let value = store.fetch(&query::product_exists(id)).await?;
    Ok(!matches!(value, Value::Null))
}
