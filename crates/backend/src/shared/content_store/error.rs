/// Ошибки обращения к хранилищу контента
#[derive(Debug, thiserror::Error)]
pub enum ContentStoreError {
    #[error("content store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("content store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode content store response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("write token is not configured")]
    MissingToken,

    #[error("content store is unavailable: {0}")]
    Unavailable(String),
}
