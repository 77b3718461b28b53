use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

pub const SEARCH_PAGE_SIZE: u32 = 500;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchRequest {
    pub expression: String,
    pub max_results: u32,
    pub sort_by: Vec<Value>,
    pub with_field: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl SearchRequest {
    /// First page of `expression`, sorted by public id ascending.
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            max_results: SEARCH_PAGE_SIZE,
            sort_by: vec![serde_json::json!({ "public_id": "asc" })],
            with_field: vec!["context".to_string(), "tags".to_string()],
            next_cursor: None,
        }
    }

    pub fn with_cursor(mut self, cursor: Option<String>) -> Self {
        self.next_cursor = cursor;
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SearchResponse {
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Resource {
    #[serde(default)]
    pub public_id: String,
    #[serde(default)]
    pub secure_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub context: Option<Value>,
}

impl Resource {
    pub fn delivery_url(&self) -> &str {
        self.secure_url
            .as_deref()
            .or(self.url.as_deref())
            .unwrap_or_default()
    }

    /// Custom context value. The Search API returns context entries flat,
    /// the Admin API nests them under `custom`; both are accepted.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        let context = self.context.as_ref()?;
        context
            .get("custom")
            .and_then(|custom| custom.get(key))
            .or_else(|| context.get(key))
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file: PathBuf,
    pub folder: String,
    pub public_id: String,
    pub overwrite: bool,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct UploadResponse {
    #[serde(default)]
    pub public_id: String,
    #[serde(default)]
    pub secure_url: String,
}
