use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::a001_product::aggregate::{ProductId, ProductSnapshot};
use crate::domain::common::{null_as_default, Reference};

// ============================================================================
// ID Type
// ============================================================================

/// Идентификатор комментария в хранилище контента
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub String);

impl CommentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Read model
// ============================================================================

/// Комментарий к товару в том виде, в котором он приходит в ветке обсуждения.
///
/// E-mail автора собирается при отправке, но в ветку не выбирается.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: CommentId,

    #[serde(default, deserialize_with = "null_as_default")]
    pub comment: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,

    #[serde(rename = "_createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Снимок товара, на который ссылается комментарий (`product->{...}`)
    #[serde(default)]
    pub product: Option<ProductSnapshot>,
}

impl Comment {
    pub fn product_id(&self) -> Option<&ProductId> {
        self.product.as_ref().map(|p| &p.id)
    }
}

/// Ветка комментариев товара, порядок: порядок поступления
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentThread {
    #[serde(rename = "commentsData", default, deserialize_with = "null_as_default")]
    pub comments: Vec<Comment>,
}

impl CommentThread {
    pub fn new(comments: Vec<Comment>) -> Self {
        Self { comments }
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

// ============================================================================
// Write model
// ============================================================================

/// Ошибки проверки обязательных полей комментария
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name is required")]
    EmptyUsername,
    #[error("E-mail is required")]
    EmptyEmail,
    #[error("Comment is required")]
    EmptyComment,
    #[error("Product id is required")]
    EmptyProductId,
    #[error("E-mail address is not valid")]
    InvalidEmail,
}

/// Черновик комментария в форме
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDraft {
    pub username: String,
    pub email: String,
    pub comment: String,
}

impl CommentDraft {
    /// Проверка обязательности полей; строка из пробелов считается пустой
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::EmptyUsername);
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::EmptyEmail);
        }
        if self.comment.trim().is_empty() {
            return Err(ValidationError::EmptyComment);
        }
        Ok(())
    }

    /// Запрос на создание; значения передаются как есть, без обрезки
    pub fn to_request(&self, product_id: &ProductId) -> CreateCommentRequest {
        CreateCommentRequest {
            product_id: product_id.value().to_string(),
            username: self.username.clone(),
            email: self.email.clone(),
            comment: self.comment.clone(),
        }
    }
}

/// Тело `POST /api/comment`: `{_id, username, email, comment}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    #[serde(rename = "_id")]
    pub product_id: String,
    pub username: String,
    pub email: String,
    pub comment: String,
}

impl CreateCommentRequest {
    /// Серверная проверка: обязательные поля и минимальный формат e-mail
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.product_id.trim().is_empty() {
            return Err(ValidationError::EmptyProductId);
        }
        CommentDraft {
            username: self.username.clone(),
            email: self.email.clone(),
            comment: self.comment.clone(),
        }
        .validate()?;

        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(ValidationError::InvalidEmail),
        }
    }

    /// Документ комментария для мутации `create`
    pub fn to_document(&self) -> CommentDocument {
        CommentDocument {
            kind: "comment".to_string(),
            username: self.username.clone(),
            email: self.email.clone(),
            comment: self.comment.clone(),
            product: Reference::to(self.product_id.trim()),
        }
    }
}

/// Ответ `POST /api/comment`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCommentResponse {
    pub message: String,
    pub id: String,
}

/// Сохраняемый документ комментария; ссылка на товар неизменна
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDocument {
    #[serde(rename = "_type")]
    pub kind: String,
    pub username: String,
    pub email: String,
    pub comment: String,
    pub product: Reference,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(username: &str, email: &str, comment: &str) -> CommentDraft {
        CommentDraft {
            username: username.to_string(),
            email: email.to_string(),
            comment: comment.to_string(),
        }
    }

    #[test]
    fn test_request_body_is_exact() {
        let request = draft("Ada", "a@x.com", "Great!").to_request(&ProductId::new("p1"));
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"_id":"p1","username":"Ada","email":"a@x.com","comment":"Great!"}"#
        );
    }

    #[test]
    fn test_request_values_are_verbatim() {
        let request = draft(" Ada ", "a@x.com", "Great!\n").to_request(&ProductId::new("p1"));
        assert_eq!(request.username, " Ada ");
        assert_eq!(request.comment, "Great!\n");
    }

    #[test]
    fn test_draft_validation_requires_every_field() {
        assert_eq!(
            draft("", "a@x.com", "hi").validate(),
            Err(ValidationError::EmptyUsername)
        );
        assert_eq!(draft("Ada", " ", "hi").validate(), Err(ValidationError::EmptyEmail));
        assert_eq!(
            draft("Ada", "a@x.com", "").validate(),
            Err(ValidationError::EmptyComment)
        );
        assert!(draft("Ada", "a@x.com", "hi").validate().is_ok());
    }

    #[test]
    fn test_server_validation_checks_email_shape() {
        let mut request = draft("Ada", "not-an-email", "hi").to_request(&ProductId::new("p1"));
        assert_eq!(request.validate(), Err(ValidationError::InvalidEmail));
        request.email = "a@x.com".to_string();
        assert!(request.validate().is_ok());
        request.product_id = String::new();
        assert_eq!(request.validate(), Err(ValidationError::EmptyProductId));
    }

    #[test]
    fn test_document_references_product() {
        let doc = draft("Ada", "a@x.com", "Great!")
            .to_request(&ProductId::new("p1"))
            .to_document();
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({
                "_type": "comment",
                "username": "Ada",
                "email": "a@x.com",
                "comment": "Great!",
                "product": {"_type": "reference", "_ref": "p1"}
            })
        );
    }

    #[test]
    fn test_thread_deserializes_from_join_projection() {
        let thread: CommentThread = serde_json::from_value(json!({
            "commentsData": [{
                "_id": "c1",
                "comment": "Nice",
                "username": "Bob",
                "_createdAt": "2024-03-01T10:00:00Z",
                "product": {"_id": "p1", "slug": {"current": "red-shoes"}, "image": null, "name": "Red Shoes"}
            }]
        }))
        .unwrap();

        assert_eq!(thread.len(), 1);
        assert_eq!(thread.comments[0].product_id(), Some(&ProductId::new("p1")));
        assert!(thread.comments[0].created_at.is_some());
    }

    #[test]
    fn test_thread_tolerates_null_comments() {
        let thread: CommentThread = serde_json::from_value(json!({"commentsData": null})).unwrap();
        assert!(thread.is_empty());
    }
}
