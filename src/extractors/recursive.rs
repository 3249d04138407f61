// src/extractors/recursive.rs
use crate::extractors::path::JsonPath;
use crate::extractors::pipeline::{ExtractionMethod, SearchStrategy};
use crate::extractors::record::{is_knowledge, ResultRecord};
use serde_json::{Map, Value};

/// Walks the whole document looking for `web_search` tool nodes.
///
/// Traversal is depth-first pre-order over an explicit stack, so deeply
/// nested input cannot exhaust the call stack. Results come out in the order
/// their enclosing tool node is reached, then in `content` order.
#[derive(Debug, Clone, Default)]
pub struct RecursiveScanner;

impl RecursiveScanner {
    pub fn new() -> Self {
        Self
    }

    pub fn scan(&self, document: &Value) -> Vec<ResultRecord> {
        let mut results = Vec::new();
        let mut stack: Vec<(&Value, JsonPath)> = vec![(document, JsonPath::root())];
        let mut visited = 0usize;

        while let Some((node, path)) = stack.pop() {
            visited += 1;
            match node {
                Value::Object(map) => {
                    if let Some(items) = web_search_content(map) {
                        let before = results.len();
                        results.extend(
                            items
                                .iter()
                                .filter(|item| is_knowledge(item))
                                .map(|item| ResultRecord::from_node(item, Some(&path))),
                        );
                        tracing::trace!("web_search node at '{}' held {} records", path, results.len() - before);
                    }
                    // Reverse push so the first key is popped first.
                    for (key, value) in map.iter().rev() {
                        stack.push((value, path.child_key(key)));
                    }
                }
                Value::Array(items) => {
                    for (index, value) in items.iter().enumerate().rev() {
                        stack.push((value, path.child_index(index)));
                    }
                }
                _ => {}
            }
        }

        tracing::debug!("Recursive scan visited {} nodes, found {} records", visited, results.len());
        results
    }
}

/// The `content` sequence of a node named `web_search`, if it has one.
fn web_search_content(map: &Map<String, Value>) -> Option<&Vec<Value>> {
    if map.get("name").and_then(Value::as_str) != Some("web_search") {
        return None;
    }
    map.get("content")?.as_array()
}

impl SearchStrategy for RecursiveScanner {
    fn name(&self) -> &'static str {
        "recursive scanner"
    }

    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::RecursiveSearch
    }

    fn search(&self, document: &Value) -> Vec<ResultRecord> {
        self.scan(document)
    }
}
