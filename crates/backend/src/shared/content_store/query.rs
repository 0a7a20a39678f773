//! Запросы к хранилищу контента.
//!
//! Текст запроса: константа; всё, что приходит извне (slug, id), передаётся
//! как `$параметр` и никогда не подставляется в текст запроса.

use maplit::btreemap;
use serde_json::{json, Value};
use std::collections::BTreeMap;

use super::ContentStoreError;

pub const PRODUCT_SLUGS: &str = "product_slugs";
pub const PRODUCT_BY_SLUG: &str = "product_by_slug";
pub const COMMENT_THREAD_BY_SLUG: &str = "comment_thread_by_slug";
pub const PRODUCT_EXISTS: &str = "product_exists";

const PRODUCT_SLUGS_QUERY: &str = r#"*[_type == "product" && defined(slug.current)]{
  slug {
    current
  }
}"#;

const PRODUCT_BY_SLUG_QUERY: &str = r#"*[_type == "product" && slug.current == $slug][0]"#;

const COMMENT_THREAD_BY_SLUG_QUERY: &str = r#"*[_type == "product" && slug.current == $slug][0]{
  "commentsData": *[_type == "comment" && product._ref == ^._id]{
    _id,
    comment,
    username,
    _createdAt,
    product->{
      _id,
      slug,
      image,
      name
    }
  }
}"#;

const PRODUCT_EXISTS_QUERY: &str = r#"*[_type == "product" && _id == $id][0]{ _id }"#;

/// Параметризованный запрос
#[derive(Debug, Clone, PartialEq)]
pub struct GroqQuery {
    /// Имя запроса (для логов и in-memory хранилища)
    pub name: &'static str,
    pub text: &'static str,
    pub params: BTreeMap<String, Value>,
}

impl GroqQuery {
    pub fn new(name: &'static str, text: &'static str) -> Self {
        Self {
            name,
            text,
            params: BTreeMap::new(),
        }
    }

    pub fn with_params(mut self, params: BTreeMap<String, Value>) -> Self {
        self.params = params;
        self
    }

    pub fn str_param(&self, name: &str) -> Result<&str, ContentStoreError> {
        self.params
            .get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ContentStoreError::InvalidQuery(format!("{}: missing ${}", self.name, name))
            })
    }

    /// Пары для URL: `query=<текст>`, `$имя=<json>`
    pub fn url_pairs(&self) -> Result<Vec<(String, String)>, ContentStoreError> {
        let mut pairs = vec![("query".to_string(), self.text.to_string())];
        for (name, value) in &self.params {
            if !is_valid_param_name(name) {
                return Err(ContentStoreError::InvalidQuery(format!(
                    "{}: invalid parameter name '{}'",
                    self.name, name
                )));
            }
            pairs.push((format!("${}", name), serde_json::to_string(value)?));
        }
        Ok(pairs)
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_valid_param_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn product_slugs() -> GroqQuery {
    GroqQuery::new(PRODUCT_SLUGS, PRODUCT_SLUGS_QUERY)
}

pub fn product_by_slug(slug: &str) -> GroqQuery {
    GroqQuery::new(PRODUCT_BY_SLUG, PRODUCT_BY_SLUG_QUERY).with_params(btreemap! {
        "slug".to_string() => json!(slug),
    })
}

pub fn comment_thread_by_slug(slug: &str) -> GroqQuery {
    GroqQuery::new(COMMENT_THREAD_BY_SLUG, COMMENT_THREAD_BY_SLUG_QUERY).with_params(btreemap! {
        "slug".to_string() => json!(slug),
    })
}

pub fn product_exists(id: &str) -> GroqQuery {
    GroqQuery::new(PRODUCT_EXISTS, PRODUCT_EXISTS_QUERY).with_params(btreemap! {
        "id".to_string() => json!(id),
    })
}
