//! Хранилище контента в памяти процесса.
//!
//! Отвечает на те же именованные запросы, что и Sanity, по набору
//! JSON-документов. Используется для локального запуска и в тестах.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::RwLock;

use super::query::{COMMENT_THREAD_BY_SLUG, PRODUCT_BY_SLUG, PRODUCT_EXISTS, PRODUCT_SLUGS};
use super::{ContentStore, ContentStoreError, GroqQuery};

#[derive(Default)]
pub struct InMemoryContentStore {
    documents: RwLock<Vec<Value>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(documents: Vec<Value>) -> Self {
        Self {
            documents: RwLock::new(documents),
        }
    }

    /// Загрузить документы из JSON-массива
    pub fn from_seed_file(path: &Path) -> Result<Self, ContentStoreError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ContentStoreError::Unavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        let documents: Vec<Value> = serde_json::from_str(&contents)?;
        Ok(Self::with_documents(documents))
    }

    pub fn len(&self) -> usize {
        self.read().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Документы заданного типа в порядке поступления
    pub fn documents_of_type(&self, kind: &str) -> Vec<Value> {
        self.read()
            .map(|docs| docs.iter().filter(|d| is_type(d, kind)).cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<Value>>, ContentStoreError> {
        self.documents
            .read()
            .map_err(|_| ContentStoreError::Unavailable("document lock poisoned".to_string()))
    }
}

fn is_type(doc: &Value, kind: &str) -> bool {
    doc.get("_type").and_then(Value::as_str) == Some(kind)
}

fn slug_of(doc: &Value) -> Option<&str> {
    doc.pointer("/slug/current").and_then(Value::as_str)
}

fn id_of(doc: &Value) -> Option<&str> {
    doc.get("_id").and_then(Value::as_str)
}

fn field(doc: &Value, name: &str) -> Value {
    doc.get(name).cloned().unwrap_or(Value::Null)
}

fn product_by_slug<'a>(docs: &'a [Value], slug: &str) -> Option<&'a Value> {
    docs.iter()
        .find(|d| is_type(d, "product") && slug_of(d) == Some(slug))
}

/// `product->{_id, slug, image, name}`
fn dereference_product(docs: &[Value], target: &str) -> Value {
    docs.iter()
        .find(|d| is_type(d, "product") && id_of(d) == Some(target))
        .map(|p| {
            json!({
                "_id": field(p, "_id"),
                "slug": field(p, "slug"),
                "image": field(p, "image"),
                "name": field(p, "name"),
            })
        })
        .unwrap_or(Value::Null)
}

fn comment_thread(docs: &[Value], product: &Value) -> Value {
    let Some(product_id) = id_of(product) else {
        return json!({ "commentsData": [] });
    };

    let comments: Vec<Value> = docs
        .iter()
        .filter(|d| is_type(d, "comment"))
        .filter(|d| d.pointer("/product/_ref").and_then(Value::as_str) == Some(product_id))
        .map(|c| {
            json!({
                "_id": field(c, "_id"),
                "comment": field(c, "comment"),
                "username": field(c, "username"),
                "_createdAt": field(c, "_createdAt"),
                "product": dereference_product(docs, product_id),
            })
        })
        .collect();

    json!({ "commentsData": comments })
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn fetch(&self, query: &GroqQuery) -> Result<Value, ContentStoreError> {
        let docs = self.read()?;

        let result = match query.name {
            PRODUCT_SLUGS => Value::Array(
                docs.iter()
                    .filter(|d| is_type(d, "product"))
                    .filter_map(slug_of)
                    .map(|slug| json!({ "slug": { "current": slug } }))
                    .collect(),
            ),
            PRODUCT_BY_SLUG => {
                let slug = query.str_param("slug")?;
                product_by_slug(&docs, slug).cloned().unwrap_or(Value::Null)
            }
            COMMENT_THREAD_BY_SLUG => {
                let slug = query.str_param("slug")?;
                product_by_slug(&docs, slug)
                    .map(|product| comment_thread(&docs, product))
                    .unwrap_or(Value::Null)
            }
            PRODUCT_EXISTS => {
                let id = query.str_param("id")?;
                docs.iter()
                    .find(|d| is_type(d, "product") && id_of(d) == Some(id))
                    .map(|p| json!({ "_id": field(p, "_id") }))
                    .unwrap_or(Value::Null)
            }
            other => {
                return Err(ContentStoreError::InvalidQuery(format!(
                    "unsupported query '{}'",
                    other
                )))
            }
        };

        Ok(result)
    }

    async fn create(&self, mut document: Value) -> Result<String, ContentStoreError> {
        let Some(object) = document.as_object_mut() else {
            return Err(ContentStoreError::InvalidQuery(
                "document must be a JSON object".to_string(),
            ));
        };

        let id = uuid::Uuid::new_v4().to_string();
        object.insert("_id".to_string(), json!(id));
        object.insert("_createdAt".to_string(), json!(chrono::Utc::now().to_rfc3339()));

        self.documents
            .write()
            .map_err(|_| ContentStoreError::Unavailable("document lock poisoned".to_string()))?
            .push(document);

        Ok(id)
    }
}
