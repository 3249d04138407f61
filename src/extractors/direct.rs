// src/extractors/direct.rs
use crate::extractors::path::{JsonPath, PathSegment};
use crate::extractors::pipeline::{ExtractionMethod, SearchStrategy};
use crate::extractors::record::{is_knowledge, ResultRecord};
use once_cell::sync::Lazy;
use serde_json::Value;

/// Text form of [`DEFAULT_DIRECT_PATH`], used as the CLI default.
pub const DEFAULT_DIRECT_PATH_STR: &str = "chat_messages[3].content[2]";

/// Where the observed export format keeps the web search tool result.
pub static DEFAULT_DIRECT_PATH: Lazy<JsonPath> = Lazy::new(|| {
    JsonPath::from_segments(vec![
        PathSegment::Key("chat_messages".to_string()),
        PathSegment::Index(3),
        PathSegment::Key("content".to_string()),
        PathSegment::Index(2),
    ])
});

/// Reads results from one known coordinate of the document.
#[derive(Debug, Clone)]
pub struct DirectLocator {
    coordinate: JsonPath,
}

impl DirectLocator {
    pub fn new(coordinate: JsonPath) -> Self {
        Self { coordinate }
    }

    pub fn coordinate(&self) -> &JsonPath {
        &self.coordinate
    }

    /// `None` when the coordinate does not exist in the document.
    /// `Some(empty)` when it exists but is not a `tool_result` with knowledge items.
    pub fn locate(&self, document: &Value) -> Option<Vec<ResultRecord>> {
        let node = match self.coordinate.resolve(document) {
            Some(node) => node,
            None => {
                tracing::debug!("Direct path {} not present in document", self.coordinate);
                return None;
            }
        };

        if node.get("type").and_then(Value::as_str) != Some("tool_result") {
            tracing::debug!("Node at {} is not a tool_result", self.coordinate);
            return Some(Vec::new());
        }

        let records: Vec<ResultRecord> = node
            .get("content")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter(|item| is_knowledge(item))
                    .map(|item| ResultRecord::from_node(item, None))
                    .collect()
            })
            .unwrap_or_default();

        tracing::debug!("Direct path {} yielded {} records", self.coordinate, records.len());
        Some(records)
    }
}

impl Default for DirectLocator {
    fn default() -> Self {
        Self::new(DEFAULT_DIRECT_PATH.clone())
    }
}

impl SearchStrategy for DirectLocator {
    fn name(&self) -> &'static str {
        "direct locator"
    }

    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::DirectPath
    }

    fn search(&self, document: &Value) -> Vec<ResultRecord> {
        self.locate(document).unwrap_or_default()
    }
}
