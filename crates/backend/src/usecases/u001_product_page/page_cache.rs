use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct CachedPage {
    html: String,
    rendered_at: Instant,
}

/// Кэш отрисованных страниц товара (in-memory, по slug)
///
/// Страница старше `revalidate` считается устаревшей и перерисовывается
/// при следующем запросе.
#[derive(Debug)]
pub struct PageCache {
    pages: RwLock<HashMap<String, CachedPage>>,
    revalidate: Duration,
}

impl PageCache {
    pub fn new(revalidate: Duration) -> Self {
        Self {
            pages: RwLock::new(HashMap::new()),
            revalidate,
        }
    }

    /// Свежая страница или `None`
    pub async fn get_fresh(&self, slug: &str) -> Option<String> {
        self.get_fresh_at(slug, Instant::now()).await
    }

    async fn get_fresh_at(&self, slug: &str, now: Instant) -> Option<String> {
        let pages = self.pages.read().await;
        pages
            .get(slug)
            .filter(|page| now.saturating_duration_since(page.rendered_at) < self.revalidate)
            .map(|page| page.html.clone())
    }

    pub async fn insert(&self, slug: &str, html: String) {
        self.pages.write().await.insert(
            slug.to_string(),
            CachedPage {
                html,
                rendered_at: Instant::now(),
            },
        );
    }

    pub async fn invalidate(&self, slug: &str) {
        self.pages.write().await.remove(slug);
    }

    pub async fn len(&self) -> usize {
        self.pages.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fresh_page_is_served() {
        let cache = PageCache::new(Duration::from_secs(60));
        cache.insert("red-shoes", "<html/>".to_string()).await;

        assert_eq!(cache.get_fresh("red-shoes").await.as_deref(), Some("<html/>"));
        assert!(cache.get_fresh("blue-hat").await.is_none());
    }

    #[tokio::test]
    async fn test_stale_page_is_not_served() {
        let cache = PageCache::new(Duration::from_secs(60));
        cache.insert("red-shoes", "<html/>".to_string()).await;

        let later = Instant::now() + Duration::from_secs(61);
        assert!(cache.get_fresh_at("red-shoes", later).await.is_none());
    }

    #[tokio::test]
    async fn test_invalidate() {
        let cache = PageCache::new(Duration::from_secs(60));
        cache.insert("red-shoes", "<html/>".to_string()).await;
        cache.invalidate("red-shoes").await;
        assert_eq!(cache.len().await, 0);
    }
}
