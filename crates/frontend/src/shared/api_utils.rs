//! API utilities for frontend-backend communication

/// Get the base URL for API requests
///
/// Frontend is served by the backend itself (`dist` + fallback), so the API
/// lives on the same origin whatever `server.port` is configured. Under
/// `trunk serve` the `/api/` prefix is proxied to the backend (Trunk.toml).
/// Empty string if window is not available (relative URLs are used then).
pub fn api_base() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// URL страницы товара в API; slug кодируется как сегмент пути
pub fn product_api_url(slug: &str) -> String {
    format!("{}/api/product/{}", api_base(), urlencoding::encode(slug))
}

pub fn comment_api_url() -> String {
    format!("{}/api/comment", api_base())
}
