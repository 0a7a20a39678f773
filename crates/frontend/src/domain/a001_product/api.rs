use contracts::shared::page::ProductPagePayload;
use gloo_net::http::Request;

use crate::shared::api_utils::product_api_url;

/// Данные страницы товара; `Ok(None)`: товара с таким slug нет
pub async fn fetch_product_page(slug: &str) -> Result<Option<ProductPagePayload>, String> {
    let response = Request::get(&product_api_url(slug))
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status() == 404 {
        return Ok(None);
    }
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .json::<ProductPagePayload>()
        .await
        .map(Some)
        .map_err(|e| e.to_string())
}
