use contracts::shared::page::RouteSet;

use super::{escape, layout};

pub const INDEX_TITLE: &str = "All products";

/// Список всех товаров ("Back to all products")
pub fn render_index(routes: &RouteSet, store_name: &str) -> String {
    let items: String = routes
        .routes
        .iter()
        .map(|route| {
            format!(
                r#"        <li><a href="{}">{}</a></li>
"#,
                escape(&route.path()),
                escape(&route.slug)
            )
        })
        .collect();

    let list = if items.is_empty() {
        "    <p class=\"empty\">No products yet</p>\n".to_string()
    } else {
        format!("    <ul class=\"product-list\">\n{}    </ul>\n", items)
    };

    let body = format!(
        "<main class=\"index\">\n    <h1>{}</h1>\n{}</main>",
        escape(INDEX_TITLE),
        list
    );

    let title = if store_name.is_empty() {
        INDEX_TITLE.to_string()
    } else {
        format!("{} | {}", INDEX_TITLE, store_name)
    };
    layout(&title, &body)
}
