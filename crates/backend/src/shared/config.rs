use contracts::shared::media::{ImageUrlBuilder, DEFAULT_CDN_BASE, DEFAULT_PLACEHOLDER_URL};
use contracts::usecases::u001_comment_submission::ACK_WINDOW_MS;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Переменная окружения с токеном хранилища контента (перекрывает config.toml)
pub const TOKEN_ENV: &str = "CONTENT_STORE_TOKEN";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    pub content_store: ContentStoreConfig,
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub pages: PagesConfig,
    #[serde(default)]
    pub comments: CommentsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Каталог собранного frontend (trunk dist)
    pub static_dir: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Название магазина для заголовка страницы
    pub name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "JestinaCommerce".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContentStoreBackend {
    Sanity,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentStoreConfig {
    pub backend: ContentStoreBackend,
    pub project_id: String,
    pub dataset: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Токен с правом записи, нужен для создания комментариев
    pub token: Option<String>,
    #[serde(default)]
    pub use_cdn: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// JSON-файл с документами для backend = "memory"
    pub seed_path: Option<String>,
}

fn default_api_version() -> String {
    "2021-10-21".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct MediaConfig {
    pub cdn_base: String,
    pub placeholder_url: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            cdn_base: DEFAULT_CDN_BASE.to_string(),
            placeholder_url: DEFAULT_PLACEHOLDER_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PagesConfig {
    /// Через сколько секунд закэшированная страница перерисовывается
    pub revalidate_secs: u64,
    /// Отрисовать все известные маршруты при старте
    pub prerender: bool,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            revalidate_secs: 60,
            prerender: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CommentsConfig {
    pub ack_window_ms: u64,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            ack_window_ms: ACK_WINDOW_MS,
        }
    }
}

impl Config {
    pub fn image_url_builder(&self) -> ImageUrlBuilder {
        ImageUrlBuilder::new(&self.content_store.project_id, &self.content_store.dataset)
            .with_cdn_base(&self.media.cdn_base)
            .with_placeholder(&self.media.placeholder_url)
    }

    /// Токен из окружения имеет приоритет над файлом
    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.trim().is_empty() {
                self.content_store.token = Some(token);
            }
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "127.0.0.1"
port = 3000
static_dir = "dist"

[store]
name = "JestinaCommerce"

[content_store]
backend = "memory"
project_id = "4rywkbjf"
dataset = "production"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = match find_config_file() {
        Some(config_path) => {
            tracing::info!("Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path)?;
            parse_config(&contents)?
        }
        None => {
            tracing::info!("Using default embedded configuration");
            parse_config(DEFAULT_CONFIG)?
        }
    };
    config.apply_env_overrides();
    Ok(config)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    Ok(config)
}

fn find_config_file() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let config_path = exe_path.parent()?.join("config.toml");
    if config_path.exists() {
        Some(config_path)
    } else {
        tracing::warn!("config.toml not found at: {}", config_path.display());
        None
    }
}

/// Resolves a relative path against the executable directory
pub fn resolve_path(path_str: &str) -> PathBuf {
    let path = Path::new(path_str);
    if path.is_absolute() {
        return path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved = exe_dir.join(path);
            if resolved.exists() {
                return resolved;
            }
        }
    }

    // Fallback: relative to current directory
    PathBuf::from(path_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.content_store.backend, ContentStoreBackend::Memory);
        assert_eq!(config.content_store.api_version, "2021-10-21");
        assert_eq!(config.pages.revalidate_secs, 60);
        assert_eq!(config.comments.ack_window_ms, 5_000);
        assert_eq!(config.store.name, "JestinaCommerce");
    }

    #[test]
    fn test_sanity_config_with_media_section() {
        let config = parse_config(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [content_store]
            backend = "sanity"
            project_id = "abc"
            dataset = "staging"
            use_cdn = true

            [media]
            cdn_base = "https://img.example.com"
            placeholder_url = "/none.png"
            "#,
        )
        .unwrap();

        assert_eq!(config.content_store.backend, ContentStoreBackend::Sanity);
        assert!(config.content_store.use_cdn);
        let media = config.image_url_builder();
        assert_eq!(media.project_id, "abc");
        assert_eq!(media.dataset, "staging");
        assert_eq!(media.cdn_base, "https://img.example.com");
        assert_eq!(media.url_for(None), "/none.png");
    }
}
