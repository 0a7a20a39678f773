//! Клиент хранилища контента: структурированные запросы с JSON-ответом.

pub mod error;
pub mod in_memory;
pub mod query;
pub mod sanity_client;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use error::ContentStoreError;
pub use in_memory::InMemoryContentStore;
pub use query::GroqQuery;
pub use sanity_client::SanityClient;

/// Хранилище контента (система учёта товаров и комментариев)
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Выполнить запрос; значения передаются только через параметры
    async fn fetch(&self, query: &GroqQuery) -> Result<Value, ContentStoreError>;

    /// Создать документ, вернуть его `_id`
    async fn create(&self, document: Value) -> Result<String, ContentStoreError>;
}

/// Выполнить запрос и десериализовать результат
pub async fn fetch_as<T: DeserializeOwned>(
    store: &dyn ContentStore,
    query: &GroqQuery,
) -> Result<T, ContentStoreError> {
    let value = store.fetch(query).await?;
    serde_json::from_value(value).map_err(ContentStoreError::from)
}
