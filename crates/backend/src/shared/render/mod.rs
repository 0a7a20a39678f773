//! Серверная отрисовка HTML-страниц магазина.

pub mod index_page;
pub mod product_page;

pub use index_page::render_index;
pub use product_page::{render_product_page, render_unavailable};

/// Экранирование текста для вставки в HTML (в том числе в атрибуты)
pub fn escape(text: &str) -> String {
    ammonia::clean_text(text)
}

/// Общий каркас документа
pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="/styles.css">
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape(title),
        body = body
    )
}
