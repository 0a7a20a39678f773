//! Модель отображения страницы товара.
//!
//! Чистая функция от (данные страницы, состояние UI) к дереву, которое
//! затем отрисовывают сервер (HTML) и клиент (Leptos).

use serde::{Deserialize, Serialize};

use crate::domain::a002_comment::aggregate::Comment;
use crate::shared::media::ImageUrlBuilder;
use crate::shared::page::PageData;
use crate::shared::rich_text::TextBlock;
use crate::usecases::u001_comment_submission::{CommentForm, ACK_MESSAGE};

pub const INVITATION_TEXT: &str = "Be the first to leave a comment";
pub const LOADING_TEXT: &str = "Loading....";
pub const NOT_FOUND_TEXT: &str = "Product not found";

/// Состояние UI, влияющее на отрисовку
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUiState {
    pub selected_image: usize,
    pub quantity: u32,
    pub banner_visible: bool,
    pub submission_error: Option<String>,
}

impl Default for PageUiState {
    fn default() -> Self {
        Self {
            selected_image: 0,
            quantity: 1,
            banner_visible: false,
            submission_error: None,
        }
    }
}

impl PageUiState {
    pub fn with_form(mut self, form: &CommentForm) -> Self {
        self.banner_visible = form.banner_visible();
        self.submission_error = form.error_message().map(str::to_string);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProductPageView {
    NotFound { title: String },
    Product(Box<ProductView>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailView {
    pub index: usize,
    pub url: String,
    pub alt: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentView {
    pub id: String,
    pub author: String,
    pub body: String,
    /// Ссылка "вы прокомментировали" и снимок товара
    pub product_href: Option<String>,
    pub product_image: Option<ImageView>,
    pub product_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    pub title: String,
    pub product_id: String,
    pub slug: String,
    pub name: String,
    pub main_image: ImageView,
    pub thumbnails: Vec<ThumbnailView>,
    pub description: Vec<TextBlock>,
    pub price_label: String,
    pub quantity: u32,
    pub comment_count: usize,
    pub show_invitation: bool,
    pub comments: Vec<CommentView>,
    pub banner: Option<String>,
    pub submission_error: Option<String>,
}

impl ProductPageView {
    pub fn build(
        page: &PageData,
        ui: &PageUiState,
        media: &ImageUrlBuilder,
        store_name: &str,
    ) -> Self {
        let (product, thread) = match page {
            PageData::NotFound => {
                return ProductPageView::NotFound {
                    title: page_title(NOT_FOUND_TEXT, store_name),
                }
            }
            PageData::Ready { product, thread } => (product, thread),
        };

        let name = product.display_name();
        let selected = if ui.selected_image < product.image.len() {
            ui.selected_image
        } else {
            0
        };

        let thumbnails = product
            .image
            .iter()
            .enumerate()
            .map(|(index, image)| ThumbnailView {
                index,
                url: media.url_for(Some(image)),
                alt: name.clone(),
                active: index == selected,
            })
            .collect();

        let comments: Vec<CommentView> = thread
            .comments
            .iter()
            .map(|c| comment_view(c, media))
            .collect();

        ProductPageView::Product(Box::new(ProductView {
            title: page_title(&name, store_name),
            product_id: product.id.value().to_string(),
            slug: product.slug.as_str().to_string(),
            main_image: ImageView {
                url: media.url_at(&product.image, selected),
                alt: product.slug.as_str().to_string(),
            },
            name,
            thumbnails,
            description: product.description.text_blocks(),
            price_label: format_price(product.new_price),
            quantity: ui.quantity,
            comment_count: comments.len(),
            show_invitation: comments.is_empty(),
            comments,
            banner: ui.banner_visible.then(|| ACK_MESSAGE.to_string()),
            submission_error: ui.submission_error.clone(),
        }))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ProductPageView::NotFound { .. })
    }

    pub fn title(&self) -> &str {
        match self {
            ProductPageView::NotFound { title } => title,
            ProductPageView::Product(view) => &view.title,
        }
    }
}

fn comment_view(comment: &Comment, media: &ImageUrlBuilder) -> CommentView {
    let snapshot = comment.product.as_ref();
    CommentView {
        id: comment.id.value().to_string(),
        author: comment.username.clone(),
        body: comment.comment.clone(),
        product_href: snapshot.map(|p| p.href()),
        product_image: snapshot.map(|p| ImageView {
            url: media.url_at(&p.image, 0),
            alt: p.slug.as_str().to_string(),
        }),
        product_name: snapshot.map(|p| p.display_name()),
    }
}

pub fn page_title(name: &str, store_name: &str) -> String {
    if store_name.is_empty() {
        name.to_string()
    } else {
        format!("{} | {}", name, store_name)
    }
}

/// Цена без лишних нулей: 50 -> "$50", 49.9 -> "$49.90"
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("${:.0}", price)
    } else {
        format!("${:.2}", price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_product::aggregate::{Product, ProductId};
    use crate::domain::a002_comment::aggregate::{CommentId, CommentThread};
    use crate::shared::media::ImageRef;
    use crate::usecases::u001_comment_submission::SubmitOutcome;

    fn media() -> ImageUrlBuilder {
        ImageUrlBuilder::new("proj", "production")
    }

    fn red_shoes() -> Product {
        let mut product = Product::new("p1", "Red Shoes", "red-shoes");
        product.new_price = 49.99;
        product.image = vec![ImageRef::new("image-ref1-100x100-png")];
        product
    }

    fn comment(id: &str, product: &Product) -> Comment {
        Comment {
            id: CommentId::new(id),
            comment: format!("comment {}", id),
            username: "Bob".to_string(),
            created_at: None,
            product: Some(product.snapshot()),
        }
    }

    #[test]
    fn test_product_without_comments_shows_invitation() {
        let page = PageData::Ready {
            product: red_shoes(),
            thread: CommentThread::default(),
        };
        let view = ProductPageView::build(&page, &PageUiState::default(), &media(), "Shop");

        assert!(!view.is_not_found());
        let ProductPageView::Product(view) = view else {
            panic!("expected product view");
        };
        assert_eq!(view.comment_count, 0);
        assert!(view.show_invitation);
        assert_eq!(view.price_label, "$49.99");
        assert_eq!(view.title, "Red Shoes | Shop");
        assert_eq!(
            view.main_image.url,
            "https://cdn.sanity.io/images/proj/production/ref1-100x100.png"
        );
    }

    #[test]
    fn test_not_found_is_distinct_from_empty_thread() {
        let view = ProductPageView::build(&PageData::NotFound, &PageUiState::default(), &media(), "");
        assert!(view.is_not_found());
        assert_eq!(view.title(), NOT_FOUND_TEXT);
    }

    #[test]
    fn test_thread_is_not_updated_after_successful_submission() {
        let product = red_shoes();
        let page = PageData::Ready {
            thread: CommentThread::new(vec![comment("c1", &product), comment("c2", &product)]),
            product,
        };

        let mut form = CommentForm::default();
        form.set_username("Ada");
        form.set_email("a@x.com");
        form.set_comment("Great!");
        form.begin_submit(&ProductId::new("p1")).unwrap();
        form.finish_submit(SubmitOutcome::Accepted);

        let ui = PageUiState::default().with_form(&form);
        let ProductPageView::Product(view) = ProductPageView::build(&page, &ui, &media(), "") else {
            panic!("expected product view");
        };

        assert_eq!(view.comment_count, 2);
        assert!(!view.show_invitation);
        assert_eq!(view.banner.as_deref(), Some(ACK_MESSAGE));
        assert_eq!(view.comments[0].product_href.as_deref(), Some("/product/red-shoes#"));
        assert_eq!(view.submission_error, None);
    }

    #[test]
    fn test_form_errors_reach_the_view() {
        let page = PageData::Ready {
            product: red_shoes(),
            thread: CommentThread::default(),
        };

        let mut form = CommentForm::default();
        assert!(form.begin_submit(&ProductId::new("p1")).is_err());

        let ui = PageUiState::default().with_form(&form);
        let ProductPageView::Product(view) = ProductPageView::build(&page, &ui, &media(), "") else {
            panic!("expected product view");
        };
        assert_eq!(view.submission_error.as_deref(), Some("Name is required"));
        assert_eq!(view.banner, None);
    }

    #[test]
    fn test_selected_image_out_of_range_falls_back_to_first() {
        let mut product = red_shoes();
        product.image.push(ImageRef::empty());
        let page = PageData::Ready {
            product,
            thread: CommentThread::default(),
        };

        let ui = PageUiState {
            selected_image: 1,
            ..PageUiState::default()
        };
        let ProductPageView::Product(view) = ProductPageView::build(&page, &ui, &media(), "") else {
            panic!("expected product view");
        };
        assert_eq!(view.main_image.url, crate::shared::media::DEFAULT_PLACEHOLDER_URL);
        assert!(view.thumbnails[1].active);

        let ui = PageUiState {
            selected_image: 7,
            ..PageUiState::default()
        };
        let ProductPageView::Product(view) = ProductPageView::build(&page, &ui, &media(), "") else {
            panic!("expected product view");
        };
        assert!(view.thumbnails[0].active);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(50.0), "$50");
        assert_eq!(format_price(49.9), "$49.90");
    }
}
