use serde::{Deserialize, Serialize};

use crate::domain::a001_product::aggregate::Product;
use crate::domain::a002_comment::aggregate::CommentThread;
use crate::shared::media::ImageUrlBuilder;

/// Маршрут страницы товара
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteDescriptor {
    pub slug: String,
}

impl RouteDescriptor {
    pub fn new(slug: impl Into<String>) -> Self {
        Self { slug: slug.into() }
    }

    pub fn path(&self) -> String {
        product_path(&self.slug)
    }
}

/// Путь страницы товара; slug кодируется как сегмент пути
pub fn product_path(slug: &str) -> String {
    format!("/product/{}", urlencoding::encode(slug))
}

/// Путь клиентской (интерактивной) страницы товара
pub fn app_product_path(slug: &str) -> String {
    format!("/app/product/{}", urlencoding::encode(slug))
}

/// Набор заранее известных маршрутов.
///
/// При `fallback == true` маршрут, которого нет в наборе, не является
/// ошибкой: страница загружается по запросу, а пока данные в пути,
/// показывается состояние загрузки. Пустой набор означает "всё через fallback".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSet {
    pub routes: Vec<RouteDescriptor>,
    pub fallback: bool,
}

impl Default for RouteSet {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            fallback: true,
        }
    }
}

impl RouteSet {
    /// Один маршрут на каждый slug; пустые slug и повторы отбрасываются
    pub fn from_slugs<I, S>(slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut routes: Vec<RouteDescriptor> = Vec::new();
        for slug in slugs {
            let slug = slug.into();
            if slug.trim().is_empty() || routes.iter().any(|r| r.slug == slug) {
                continue;
            }
            routes.push(RouteDescriptor::new(slug));
        }
        Self {
            routes,
            fallback: true,
        }
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.routes.iter().any(|r| r.slug == slug)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Результат загрузки данных страницы.
///
/// `NotFound`: товара с таким slug нет; это не то же самое, что
/// `Ready` с пустой веткой комментариев.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageData {
    NotFound,
    Ready {
        product: Product,
        thread: CommentThread,
    },
}

impl PageData {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PageData::NotFound)
    }

    pub fn product(&self) -> Option<&Product> {
        match self {
            PageData::Ready { product, .. } => Some(product),
            PageData::NotFound => None,
        }
    }

    pub fn thread(&self) -> Option<&CommentThread> {
        match self {
            PageData::Ready { thread, .. } => Some(thread),
            PageData::NotFound => None,
        }
    }
}

/// Ответ `GET /api/product/:slug`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPagePayload {
    pub page: PageData,
    pub media: ImageUrlBuilder,
    pub store_name: String,
    /// Сколько показывать баннер подтверждения комментария
    #[serde(default = "default_ack_window_ms")]
    pub ack_window_ms: u64,
}

fn default_ack_window_ms() -> u64 {
    crate::usecases::u001_comment_submission::ACK_WINDOW_MS
}
