use contracts::domain::a002_comment::aggregate::{CommentDocument, CommentThread};

use crate::shared::content_store::{fetch_as, query, ContentStore, ContentStoreError};

/// Ветка комментариев товара; `None`, если товара с таким slug нет
pub async fn thread_for_slug(
    store: &dyn ContentStore,
    slug: &str,
) -> Result<Option<CommentThread>, ContentStoreError> {
    fetch_as(store, &query::comment_thread_by_slug(slug)).await
}

/// Сохранить документ комментария, вернуть его id
pub async fn insert(
    store: &dyn ContentStore,
    document: &CommentDocument,
) -> Result<String, ContentStoreError> {
    store.create(serde_json::to_value(document)?).await
}
