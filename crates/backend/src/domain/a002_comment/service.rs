use contracts::domain::a002_comment::aggregate::{
    CreateCommentRequest, CreateCommentResponse, ValidationError,
};

use super::repository;
use crate::domain::a001_product;
use crate::shared::content_store::{ContentStore, ContentStoreError};

pub const SUBMITTED_MESSAGE: &str = "Comment submitted";

#[derive(Debug, thiserror::Error)]
pub enum SubmitCommentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Product '{0}' not found")]
    UnknownProduct(String),

    #[error(transparent)]
    Store(#[from] ContentStoreError),
}

/// Создать комментарий к существующему товару.
///
/// Страница после этого не перечитывается: новый комментарий появится в
/// ветке при следующей перерисовке.
pub async fn submit(
    store: &dyn ContentStore,
    request: CreateCommentRequest,
) -> Result<CreateCommentResponse, SubmitCommentError> {
    request.validate()?;

    let product_id = request.product_id.trim();
    if !a001_product::repository::exists(store, product_id).await? {
        return Err(SubmitCommentError::UnknownProduct(product_id.to_string()));
    }

    let id = repository::insert(store, &request.to_document()).await?;
    tracing::info!("Comment {} created for product {}", id, product_id);

    Ok(CreateCommentResponse {
        message: SUBMITTED_MESSAGE.to_string(),
        id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::content_store::InMemoryContentStore;
    use serde_json::json;

    fn store() -> InMemoryContentStore {
        InMemoryContentStore::with_documents(vec![json!({
            "_id": "p1", "_type": "product", "name": "Red Shoes", "slug": {"current": "red-shoes"}
        })])
    }

    fn request(product_id: &str, email: &str) -> CreateCommentRequest {
        CreateCommentRequest {
            product_id: product_id.to_string(),
            username: "Ada".to_string(),
            email: email.to_string(),
            comment: "Great!".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_stores_reference_to_product() {
        let store = store();
        let response = submit(&store, request("p1", "a@x.com")).await.unwrap();

        assert_eq!(response.message, SUBMITTED_MESSAGE);
        let comments = store.documents_of_type("comment");
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0]["_id"], json!(response.id));
        assert_eq!(comments[0]["product"], json!({"_type": "reference", "_ref": "p1"}));
        assert_eq!(comments[0]["email"], "a@x.com");
    }

    #[tokio::test]
    async fn test_unknown_product_is_rejected() {
        let store = store();
        let result = submit(&store, request("p9", "a@x.com")).await;
        assert!(matches!(result, Err(SubmitCommentError::UnknownProduct(id)) if id == "p9"));
        assert!(store.documents_of_type("comment").is_empty());
    }

    #[tokio::test]
    async fn test_invalid_email_is_rejected() {
        let result = submit(&store(), request("p1", "not-an-email")).await;
        assert!(matches!(
            result,
            Err(SubmitCommentError::Validation(ValidationError::InvalidEmail))
        ));
    }
}
