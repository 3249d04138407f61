// src/extractors/record.rs
use crate::extractors::path::JsonPath;
use serde::Serialize;
use serde_json::Value;

/// Stand-in for any field the source record does not carry.
pub const MISSING: &str = "N/A";

/// Export column order. `found_at` is only written for scanner results.
pub static COLUMNS: [&str; 5] = ["title", "url", "site_name", "favicon_url", "found_at"];

/// One web search hit, flattened for display and export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    pub title: String,
    pub url: String,
    pub site_name: String,
    pub favicon_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found_at: Option<String>,
}

impl ResultRecord {
    /// Normalizes a `knowledge` node. Never fails: absent or non-scalar
    /// fields become [`MISSING`].
    pub fn from_node(node: &Value, found_at: Option<&JsonPath>) -> Self {
        let metadata = node.get("metadata");
        Self {
            title: scalar_text(node.get("title")),
            url: scalar_text(node.get("url")),
            site_name: scalar_text(metadata.and_then(|m| m.get("site_name"))),
            favicon_url: scalar_text(metadata.and_then(|m| m.get("favicon_url"))),
            found_at: found_at.map(ToString::to_string),
        }
    }

    /// Cell values in [`COLUMNS`] order; `found_at` is appended only when asked for.
    pub fn cells(&self, include_found_at: bool) -> Vec<&str> {
        let mut cells = vec![
            self.title.as_str(),
            self.url.as_str(),
            self.site_name.as_str(),
            self.favicon_url.as_str(),
        ];
        if include_found_at {
            cells.push(self.found_at.as_deref().unwrap_or(""));
        }
        cells
    }
}

/// True for objects whose `type` is `"knowledge"`.
pub fn is_knowledge(node: &Value) -> bool {
    node.get("type").and_then(Value::as_str) == Some("knowledge")
}

fn scalar_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        // null, objects and arrays carry nothing printable
        _ => MISSING.to_string(),
    }
}
