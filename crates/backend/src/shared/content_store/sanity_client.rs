use async_trait::async_trait;
use reqwest::Url;
use serde_json::{json, Value};
use std::time::Duration;

use super::{ContentStore, ContentStoreError, GroqQuery};
use crate::shared::config::ContentStoreConfig;

/// HTTP-клиент Sanity (query/mutate API)
pub struct SanityClient {
    client: reqwest::Client,
    project_id: String,
    dataset: String,
    api_version: String,
    token: Option<String>,
    use_cdn: bool,
}

impl SanityClient {
    pub fn new(config: &ContentStoreConfig) -> Result<Self, ContentStoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            project_id: config.project_id.clone(),
            dataset: config.dataset.clone(),
            api_version: config.api_version.clone(),
            token: config.token.clone().filter(|t| !t.trim().is_empty()),
            use_cdn: config.use_cdn,
        })
    }

    fn host(&self, cdn: bool) -> String {
        let api = if cdn { "apicdn" } else { "api" };
        format!("https://{}.{}.sanity.io", self.project_id, api)
    }

    /// `GET https://{project}.api[cdn].sanity.io/v{version}/data/query/{dataset}?query=..&$slug=".."`
    pub fn build_query_url(&self, query: &GroqQuery) -> Result<Url, ContentStoreError> {
        // Запросы с токеном идут мимо CDN
        let cdn = self.use_cdn && self.token.is_none();
        let base = format!(
            "{}/v{}/data/query/{}",
            self.host(cdn),
            self.api_version,
            self.dataset
        );
        Url::parse_with_params(&base, query.url_pairs()?)
            .map_err(|e| ContentStoreError::InvalidQuery(e.to_string()))
    }

    pub fn build_mutate_url(&self) -> Result<Url, ContentStoreError> {
        let base = format!(
            "{}/v{}/data/mutate/{}",
            self.host(false),
            self.api_version,
            self.dataset
        );
        Url::parse_with_params(&base, [("returnIds", "true")])
            .map_err(|e| ContentStoreError::InvalidQuery(e.to_string()))
    }

    async fn read_json(response: reqwest::Response) -> Result<Value, ContentStoreError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ContentStoreError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ContentStore for SanityClient {
    async fn fetch(&self, query: &GroqQuery) -> Result<Value, ContentStoreError> {
        let url = self.build_query_url(query)?;
        tracing::debug!("Sanity query '{}': {}", query.name, url);

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let body = Self::read_json(request.send().await?).await?;
        Ok(body.get("result").cloned().unwrap_or(Value::Null))
    }

    async fn create(&self, document: Value) -> Result<String, ContentStoreError> {
        let token = self.token.as_ref().ok_or(ContentStoreError::MissingToken)?;
        let url = self.build_mutate_url()?;

        let payload = json!({ "mutations": [{ "create": document }] });
        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await?;

        let body = Self::read_json(response).await?;
        body.pointer("/results/0/id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                ContentStoreError::Unavailable("mutation response has no document id".to_string())
            })
    }
}
