use serde::{Deserialize, Serialize};

use crate::domain::common::null_as_default;
use crate::shared::media::ImageRef;
use crate::shared::page::product_path;
use crate::shared::rich_text::RichText;

// ============================================================================
// ID Type
// ============================================================================

/// Идентификатор товара в хранилище контента
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Slug товара (`{current: "red-shoes"}`), уникальный ключ адресации страницы
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slug {
    #[serde(default, deserialize_with = "null_as_default")]
    pub current: String,
}

impl Slug {
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: current.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.current
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Товар (документ `_type == "product"`), только для чтения
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: Slug,

    /// Упорядоченный список изображений, может быть разреженным
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: Vec<ImageRef>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: RichText,

    /// Текущая цена (без валюты)
    #[serde(default, deserialize_with = "null_as_default")]
    pub new_price: f64,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            slug: Slug::new(slug),
            image: Vec::new(),
            description: RichText::default(),
            new_price: 0.0,
        }
    }

    /// Название для отображения: первый апостроф в названии удаляется
    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }

    /// Снимок товара, который хранится рядом с комментарием
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id.clone(),
            slug: self.slug.clone(),
            image: self.image.clone(),
            name: self.name.clone(),
        }
    }
}

/// Денормализованный снимок товара внутри комментария
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    #[serde(rename = "_id")]
    pub id: ProductId,

    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: Slug,

    #[serde(default, deserialize_with = "null_as_default")]
    pub image: Vec<ImageRef>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl ProductSnapshot {
    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }

    /// Ссылка "вы прокомментировали" на страницу товара
    pub fn href(&self) -> String {
        format!("{}#", product_path(self.slug.as_str()))
    }
}

fn display_name(name: &str) -> String {
    name.replacen('\'', "", 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_deserializes_from_store_document() {
        let product: Product = serde_json::from_value(json!({
            "_id": "p1",
            "_type": "product",
            "name": "Red Shoes",
            "slug": {"_type": "slug", "current": "red-shoes"},
            "image": [{"_type": "image", "asset": {"_ref": "image-a-1x1-png"}}],
            "new_price": 49.99
        }))
        .unwrap();

        assert_eq!(product.id, ProductId::new("p1"));
        assert_eq!(product.slug.as_str(), "red-shoes");
        assert_eq!(product.image.len(), 1);
        assert!(product.description.is_empty());
        assert_eq!(product.new_price, 49.99);
    }

    #[test]
    fn test_product_tolerates_null_fields() {
        let product: Product = serde_json::from_value(json!({
            "_id": "p2",
            "name": "Draft",
            "slug": {"current": "draft"},
            "image": null,
            "description": null,
            "new_price": null
        }))
        .unwrap();

        assert!(product.image.is_empty());
        assert_eq!(product.new_price, 0.0);
    }

    #[test]
    fn test_display_name_strips_first_apostrophe() {
        let product = Product::new("p1", "Kid's 'Runner'", "runner");
        assert_eq!(product.display_name(), "Kids 'Runner'");
    }

    #[test]
    fn test_snapshot_href() {
        let product = Product::new("p1", "Red Shoes", "red-shoes");
        assert_eq!(product.snapshot().href(), "/product/red-shoes#");

        let odd = Product::new("p2", "Odd", "a b#c?d");
        assert_eq!(odd.snapshot().href(), "/product/a%20b%23c%3Fd#");
    }
}
