use contracts::shared::media::ImageUrlBuilder;
use std::sync::Arc;
use std::time::Duration;

use super::config::{Config, ContentStoreBackend};
use super::content_store::{ContentStore, InMemoryContentStore, SanityClient};
use crate::usecases::u001_product_page::PageCache;

/// Общее состояние обработчиков
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub pages: Arc<PageCache>,
    pub media: ImageUrlBuilder,
    pub store_name: String,
    pub ack_window_ms: u64,
}

impl AppState {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            store: build_content_store(config)?,
            pages: Arc::new(PageCache::new(Duration::from_secs(config.pages.revalidate_secs))),
            media: config.image_url_builder(),
            store_name: config.store.name.clone(),
            ack_window_ms: config.comments.ack_window_ms,
        })
    }
}

pub fn build_content_store(config: &Config) -> anyhow::Result<Arc<dyn ContentStore>> {
    let settings = &config.content_store;
    match settings.backend {
        ContentStoreBackend::Sanity => {
            tracing::info!(
                "Content store: Sanity project '{}', dataset '{}' (cdn: {})",
                settings.project_id,
                settings.dataset,
                settings.use_cdn
            );
            if settings.token.is_none() {
                tracing::warn!("No content store token: comment submission will fail");
            }
            Ok(Arc::new(SanityClient::new(settings)?))
        }
        ContentStoreBackend::Memory => {
            let store = match &settings.seed_path {
                Some(path) => {
                    let resolved = super::config::resolve_path(path);
                    let store = InMemoryContentStore::from_seed_file(&resolved)?;
                    tracing::info!(
                        "Content store: in-memory, {} documents from {}",
                        store.len(),
                        resolved.display()
                    );
                    store
                }
                None => {
                    tracing::info!("Content store: in-memory, empty");
                    InMemoryContentStore::new()
                }
            };
            Ok(Arc::new(store))
        }
    }
}
