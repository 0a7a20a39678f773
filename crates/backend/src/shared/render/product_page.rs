use contracts::shared::page_view::{
    page_title, CommentView, ProductPageView, ProductView, INVITATION_TEXT, NOT_FOUND_TEXT,
};
use contracts::shared::page::app_product_path;
use contracts::shared::rich_text::TextBlock;

use super::{escape, layout};

/// HTML страницы товара из модели отображения
pub fn render_product_page(view: &ProductPageView) -> String {
    match view {
        ProductPageView::NotFound { .. } => layout(view.title(), &not_found_body()),
        ProductPageView::Product(product) => layout(view.title(), &product_body(product)),
    }
}

pub const UNAVAILABLE_TEXT: &str = "This product can't be shown right now. Please try again later.";

/// Страница товара, когда хранилище контента не ответило
pub fn render_unavailable(store_name: &str) -> String {
    let body = format!(
        "<main class=\"unavailable\">\n    <p class=\"error\">{}</p>\n    <a href=\"/\">Back to all products</a>\n</main>",
        escape(UNAVAILABLE_TEXT)
    );
    layout(&page_title("Product unavailable", store_name), &body)
}

fn not_found_body() -> String {
    format!(
        "<main class=\"not-found\">\n    <h1>{}</h1>\n    <a href=\"/\">Back to all products</a>\n</main>",
        escape(NOT_FOUND_TEXT)
    )
}

fn product_body(view: &ProductView) -> String {
    let mut html = String::new();

    html.push_str("<main class=\"product-detail\">\n");
    html.push_str("    <a class=\"back\" href=\"/\">Back to all products</a>\n");

    // Галерея
    html.push_str("    <section class=\"gallery\">\n");
    html.push_str(&format!(
        "        <img class=\"main-image\" src=\"{}\" alt=\"{}\">\n",
        escape(&view.main_image.url),
        escape(&view.main_image.alt)
    ));
    html.push_str("        <div class=\"thumbnails\">\n");
    for thumb in &view.thumbnails {
        let class = if thumb.active { "thumb active" } else { "thumb" };
        html.push_str(&format!(
            "            <img class=\"{}\" data-index=\"{}\" src=\"{}\" alt=\"{}\">\n",
            class,
            thumb.index,
            escape(&thumb.url),
            escape(&thumb.alt)
        ));
    }
    html.push_str("        </div>\n    </section>\n");

    // Описание и цена
    html.push_str("    <section class=\"info\">\n");
    html.push_str(&format!("        <h1>{}</h1>\n", escape(&view.name)));
    html.push_str("        <div class=\"description\">\n");
    for block in &view.description {
        html.push_str(&render_block(block));
    }
    html.push_str("        </div>\n");
    html.push_str(&format!(
        "        <p class=\"price\">{}</p>\n",
        escape(&view.price_label)
    ));
    html.push_str(&format!(
        "        <div class=\"quantity\"><span class=\"minus\">-</span><span class=\"num\">{}</span><span class=\"plus\">+</span></div>\n",
        view.quantity
    ));
    html.push_str(&format!(
        "        <a class=\"buy\" href=\"{}\">Add to Cart</a>\n",
        escape(&app_product_path(&view.slug))
    ));
    html.push_str("    </section>\n");

    // Комментарии
    html.push_str(&format!(
        "    <section class=\"comments\" data-product-id=\"{}\">\n",
        escape(&view.product_id)
    ));
    html.push_str(&format!(
        "        <h2>Comments ({})</h2>\n",
        view.comment_count
    ));
    if view.show_invitation {
        html.push_str(&format!(
            "        <p class=\"invitation\">{}</p>\n",
            escape(INVITATION_TEXT)
        ));
    }
    for comment in &view.comments {
        html.push_str(&render_comment(comment));
    }
    if let Some(banner) = &view.banner {
        html.push_str(&format!(
            "        <p class=\"ack\">{}</p>\n",
            escape(banner)
        ));
    }
    if let Some(error) = &view.submission_error {
        html.push_str(&format!(
            "        <p class=\"error\">{}</p>\n",
            escape(error)
        ));
    }
    html.push_str("    </section>\n</main>");

    html
}

fn render_block(block: &TextBlock) -> String {
    let tag = match block.style.as_str() {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "blockquote" => block.style.as_str(),
        _ if block.list_item.is_some() => "li",
        _ => "p",
    };
    format!("            <{tag}>{}</{tag}>\n", escape(&block.text), tag = tag)
}

fn render_comment(comment: &CommentView) -> String {
    let mut html = String::from("        <article class=\"comment\">\n");
    html.push_str(&format!(
        "            <h3>{}</h3>\n            <p>{}</p>\n",
        escape(&comment.author),
        escape(&comment.body)
    ));
    if let Some(href) = &comment.product_href {
        html.push_str(&format!("            <a href=\"{}\">", escape(href)));
        if let Some(image) = &comment.product_image {
            html.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\">",
                escape(&image.url),
                escape(&image.alt)
            ));
        }
        html.push_str(&format!(
            "You commented on {}</a>\n",
            escape(comment.product_name.as_deref().unwrap_or_default())
        ));
    }
    html.push_str("        </article>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_product::aggregate::Product;
    use contracts::domain::a002_comment::aggregate::{Comment, CommentId, CommentThread};
    use contracts::shared::media::ImageUrlBuilder;
    use contracts::shared::page::PageData;
    use contracts::shared::page_view::PageUiState;

    fn view(page: &PageData) -> ProductPageView {
        ProductPageView::build(
            page,
            &PageUiState::default(),
            &ImageUrlBuilder::new("proj", "production"),
            "Shop",
        )
    }

    #[test]
    fn test_empty_thread_renders_invitation() {
        let page = PageData::Ready {
            product: Product::new("p1", "Red Shoes", "red-shoes"),
            thread: CommentThread::default(),
        };
        let html = render_product_page(&view(&page));

        assert!(html.contains(&escape(INVITATION_TEXT)));
        assert!(!html.contains("<article"));
    }

    #[test]
    fn test_user_content_is_escaped() {
        let product = Product::new("p1", "Red Shoes", "red-shoes");
        let comment = Comment {
            id: CommentId::new("c1"),
            comment: "<script>alert(1)</script>".to_string(),
            username: "Mallory".to_string(),
            created_at: None,
            product: Some(product.snapshot()),
        };
        let page = PageData::Ready {
            product,
            thread: CommentThread::new(vec![comment]),
        };
        let html = render_product_page(&view(&page));

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains(&escape(INVITATION_TEXT)));
    }

    #[test]
    fn test_form_banner_and_error_are_rendered() {
        use contracts::domain::a001_product::aggregate::ProductId;
        use contracts::usecases::u001_comment_submission::{CommentForm, SubmitOutcome, ACK_MESSAGE};

        let page = PageData::Ready {
            product: Product::new("p1", "Red Shoes", "red-shoes"),
            thread: CommentThread::default(),
        };
        let mut form = CommentForm::default();
        form.set_username("Ada");
        form.set_email("a@x.com");
        form.set_comment("Great!");
        form.begin_submit(&ProductId::new("p1")).unwrap();
        let ticket = form.finish_submit(SubmitOutcome::Accepted).unwrap();

        let ui = PageUiState::default().with_form(&form);
        let view = ProductPageView::build(&page, &ui, &ImageUrlBuilder::new("proj", "production"), "");
        let html = render_product_page(&view);
        assert!(html.contains(&escape(ACK_MESSAGE)));

        form.expire(ticket);
        form.set_comment("Again");
        form.begin_submit(&ProductId::new("p1")).unwrap();
        form.finish_submit(SubmitOutcome::from_status(500));
        let ui = PageUiState::default().with_form(&form);
        let view = ProductPageView::build(&page, &ui, &ImageUrlBuilder::new("proj", "production"), "");
        let html = render_product_page(&view);
        assert!(html.contains(&escape("Comment was not accepted (HTTP 500)")));
        assert!(!html.contains(&escape(ACK_MESSAGE)));
    }

    #[test]
    fn test_unavailable_page() {
        let html = render_unavailable("Shop");
        assert!(html.contains(&escape(UNAVAILABLE_TEXT)));
        assert!(html.contains(&format!("<title>{}</title>", escape("Product unavailable | Shop"))));
    }

    #[test]
    fn test_not_found_page() {
        let html = render_product_page(&view(&PageData::NotFound));
        assert!(html.contains(&escape(NOT_FOUND_TEXT)));
    }
}
