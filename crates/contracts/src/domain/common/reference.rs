use serde::{Deserialize, Serialize};

/// Ссылка на другой документ хранилища (`{_type: "reference", _ref: ...}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "_type", default = "reference_type")]
    pub kind: String,

    #[serde(rename = "_ref")]
    pub target: String,
}

fn reference_type() -> String {
    "reference".to_string()
}

impl Reference {
    pub fn to(target: impl Into<String>) -> Self {
        Self {
            kind: reference_type(),
            target: target.into(),
        }
    }
}
