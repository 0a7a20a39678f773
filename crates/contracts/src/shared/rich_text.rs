use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Описание товара в формате блоков (portable text)
///
/// Содержимое блоков не интерпретируется, только сворачивается в
/// текстовые абзацы для отрисовки.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText(pub Vec<Value>);

/// Текстовый блок, готовый к отрисовке
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Стиль блока: "normal", "h1".."h6", "blockquote"
    pub style: String,
    /// Тип списка ("bullet" / "number"), если блок является элементом списка
    pub list_item: Option<String>,
    pub text: String,
}

impl RichText {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Блоки `_type == "block"` с непустым текстом, в исходном порядке
    pub fn text_blocks(&self) -> Vec<TextBlock> {
        self.0
            .iter()
            .filter(|block| block.get("_type").and_then(Value::as_str) == Some("block"))
            .filter_map(|block| {
                let text: String = block
                    .get("children")
                    .and_then(Value::as_array)
                    .map(|children| {
                        children
                            .iter()
                            .filter_map(|span| span.get("text").and_then(Value::as_str))
                            .collect()
                    })
                    .unwrap_or_default();

                if text.trim().is_empty() {
                    return None;
                }

                Some(TextBlock {
                    style: block
                        .get("style")
                        .and_then(Value::as_str)
                        .unwrap_or("normal")
                        .to_string(),
                    list_item: block
                        .get("listItem")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    text,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_blocks_flatten_spans_and_skip_other_types() {
        let rich: RichText = serde_json::from_value(json!([
            {"_type": "block", "style": "h2", "children": [{"_type": "span", "text": "Size "}, {"_type": "span", "text": "guide"}]},
            {"_type": "image", "asset": {"_ref": "image-a-1x1-png"}},
            {"_type": "block", "children": [{"_type": "span", "text": "   "}]},
            {"_type": "block", "listItem": "bullet", "children": [{"_type": "span", "text": "Leather"}]}
        ]))
        .unwrap();

        let blocks = rich.text_blocks();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].style, "h2");
        assert_eq!(blocks[0].text, "Size guide");
        assert_eq!(blocks[1].style, "normal");
        assert_eq!(blocks[1].list_item.as_deref(), Some("bullet"));
    }
}
