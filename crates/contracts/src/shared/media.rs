//! Построение URL изображений из ссылок на ассеты хранилища контента.
//!
//! Ссылка на ассет имеет вид `image-<assetId>-<width>x<height>-<format>`,
//! CDN отдаёт его по адресу
//! `<cdn>/images/<project>/<dataset>/<assetId>-<width>x<height>.<format>`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

pub const DEFAULT_CDN_BASE: &str = "https://cdn.sanity.io";
pub const DEFAULT_PLACEHOLDER_URL: &str = "/placeholder.png";

/// Ссылка на изображение товара
///
/// Массивы изображений бывают разреженными (`null` внутри) или вовсе
/// отсутствуют, пока документ не заполнен, поэтому ссылка может быть пустой.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRef {
    asset_ref: Option<String>,
}

impl ImageRef {
    pub fn new(asset_ref: impl Into<String>) -> Self {
        Self {
            asset_ref: Some(asset_ref.into()),
        }
    }

    pub fn empty() -> Self {
        Self { asset_ref: None }
    }

    pub fn asset_ref(&self) -> Option<&str> {
        self.asset_ref.as_deref()
    }

    /// Принимает `null`, строку или объект `{asset: {_ref}}`
    pub fn from_value(value: &Value) -> Self {
        let asset_ref = match value {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => map
                .get("asset")
                .and_then(|asset| asset.get("_ref"))
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        };
        Self {
            asset_ref: asset_ref.filter(|s| !s.trim().is_empty()),
        }
    }
}

impl Serialize for ImageRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.asset_ref {
            Some(r) => json!({
                "_type": "image",
                "asset": { "_type": "reference", "_ref": r }
            })
            .serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for ImageRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Детерминированный резолвер URL изображений, без сети и кэша
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrlBuilder {
    pub cdn_base: String,
    pub project_id: String,
    pub dataset: String,
    pub placeholder_url: String,
}

impl ImageUrlBuilder {
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            cdn_base: DEFAULT_CDN_BASE.to_string(),
            project_id: project_id.into(),
            dataset: dataset.into(),
            placeholder_url: DEFAULT_PLACEHOLDER_URL.to_string(),
        }
    }

    pub fn with_cdn_base(mut self, cdn_base: impl Into<String>) -> Self {
        self.cdn_base = cdn_base.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder_url: impl Into<String>) -> Self {
        self.placeholder_url = placeholder_url.into();
        self
    }

    /// URL изображения; для пустой или нераспознанной ссылки: заглушка
    pub fn url_for(&self, image: Option<&ImageRef>) -> String {
        let Some(asset_ref) = image.and_then(ImageRef::asset_ref) else {
            return self.placeholder_url.clone();
        };

        // Уже готовый URL (бывает в локальных сидах)
        if asset_ref.starts_with("http://") || asset_ref.starts_with("https://") {
            return asset_ref.to_string();
        }

        match parse_asset_ref(asset_ref) {
            Some(asset) => format!(
                "{}/images/{}/{}/{}-{}.{}",
                self.cdn_base.trim_end_matches('/'),
                self.project_id,
                self.dataset,
                asset.id,
                asset.dimensions,
                asset.format
            ),
            None => self.placeholder_url.clone(),
        }
    }

    /// URL изображения по индексу в массиве, с той же заглушкой
    pub fn url_at(&self, images: &[ImageRef], index: usize) -> String {
        self.url_for(images.get(index))
    }
}

struct AssetRef<'a> {
    id: &'a str,
    dimensions: &'a str,
    format: &'a str,
}

fn parse_asset_ref(asset_ref: &str) -> Option<AssetRef<'_>> {
    let rest = asset_ref.strip_prefix("image-")?;
    let (rest, format) = rest.rsplit_once('-')?;
    let (id, dimensions) = rest.rsplit_once('-')?;

    let (width, height) = dimensions.split_once('x')?;
    let is_number = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if id.is_empty() || format.is_empty() || !is_number(width) || !is_number(height) {
        return None;
    }

    Some(AssetRef {
        id,
        dimensions,
        format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ImageUrlBuilder {
        ImageUrlBuilder::new("4rywkbjf", "production")
    }

    #[test]
    fn test_asset_ref_resolves_to_cdn_url() {
        let image = ImageRef::new("image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg");
        assert_eq!(
            builder().url_for(Some(&image)),
            "https://cdn.sanity.io/images/4rywkbjf/production/Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg"
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let image = ImageRef::new("image-abc-10x20-png");
        assert_eq!(builder().url_for(Some(&image)), builder().url_for(Some(&image)));
    }

    #[test]
    fn test_missing_reference_resolves_to_placeholder() {
        assert_eq!(builder().url_for(None), DEFAULT_PLACEHOLDER_URL);
        assert_eq!(
            builder().url_for(Some(&ImageRef::empty())),
            DEFAULT_PLACEHOLDER_URL
        );
        assert_eq!(builder().url_at(&[], 3), DEFAULT_PLACEHOLDER_URL);
    }

    #[test]
    fn test_malformed_reference_resolves_to_placeholder() {
        let b = builder().with_placeholder("/img/none.svg");
        for bad in ["file-abc-pdf", "image-abc", "image-abc-12xy-png", "image--10x10-png"] {
            assert_eq!(b.url_for(Some(&ImageRef::new(bad))), "/img/none.svg", "{bad}");
        }
    }

    #[test]
    fn test_absolute_url_passes_through() {
        let image = ImageRef::new("https://example.com/a.png");
        assert_eq!(builder().url_for(Some(&image)), "https://example.com/a.png");
    }

    #[test]
    fn test_image_ref_deserializes_from_sparse_array() {
        let images: Vec<ImageRef> = serde_json::from_value(json!([
            {"_type": "image", "asset": {"_ref": "image-a-1x1-png"}},
            null,
            "image-b-2x2-jpg"
        ]))
        .unwrap();

        assert_eq!(images[0].asset_ref(), Some("image-a-1x1-png"));
        assert_eq!(images[1], ImageRef::empty());
        assert_eq!(images[2].asset_ref(), Some("image-b-2x2-jpg"));
    }
}
