// src/report/mod.rs
pub mod table;

use crate::extractors::{ExtractionMethod, ExtractionResult, ResultRecord, MISSING};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

pub use table::render_table;

/// How many messages the structure analysis looks at.
const ANALYSIS_MESSAGE_LIMIT: usize = 5;

/// One-line outcome, e.g. "Found 3 web results using recursive search".
pub fn summary_line(result: &ExtractionResult) -> String {
    match result.method {
        ExtractionMethod::DirectPath => {
            format!("Found {} web results using direct path extraction", result.len())
        }
        ExtractionMethod::RecursiveSearch => {
            format!("Found {} web results using recursive search", result.len())
        }
        ExtractionMethod::NoResults => "No web search metadata found in the document".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    pub unique_domains: usize,
    pub total_urls: usize,
    pub urls_with_titles: usize,
}

impl ExtractionStats {
    pub fn from_records(records: &[ResultRecord]) -> Self {
        let domains: HashSet<&str> = records.iter().map(|r| r.site_name.as_str()).collect();
        Self {
            unique_domains: domains.len(),
            total_urls: records.len(),
            urls_with_titles: records.iter().filter(|r| r.title != MISSING).count(),
        }
    }
}

impl fmt::Display for ExtractionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unique domains: {}  Total URLs: {}  URLs with titles: {}",
            self.unique_domains, self.total_urls, self.urls_with_titles
        )
    }
}

/// What the top of the document looks like, for when nothing was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureAnalysis {
    Messages {
        count: usize,
        /// (message index, content item count, item type labels)
        samples: Vec<(usize, usize, Vec<String>)>,
    },
    NoMessages {
        keys: Vec<String>,
    },
}

impl StructureAnalysis {
    pub fn from_value(document: &Value) -> Self {
        let Some(messages) = document.get("chat_messages").and_then(Value::as_array) else {
            let keys = document
                .as_object()
                .map(|map| map.keys().cloned().collect())
                .unwrap_or_default();
            return StructureAnalysis::NoMessages { keys };
        };

        let samples = messages
            .iter()
            .take(ANALYSIS_MESSAGE_LIMIT)
            .enumerate()
            .filter_map(|(index, message)| {
                let content = message.as_object()?.get("content")?;
                let labels: Vec<String> = content
                    .as_array()
                    .map(|items| items.iter().map(type_label).collect())
                    .unwrap_or_default();
                let count = match content {
                    Value::Array(items) => items.len(),
                    Value::Object(map) => map.len(),
                    Value::String(text) => text.chars().count(),
                    _ => 0,
                };
                Some((index, count, labels))
            })
            .collect();

        StructureAnalysis::Messages { count: messages.len(), samples }
    }
}

fn type_label(item: &Value) -> String {
    match item {
        Value::Object(map) => map
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string(),
        Value::Array(_) => "array".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::Bool(_) => "bool".to_string(),
        Value::Null => "null".to_string(),
    }
}

impl fmt::Display for StructureAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File structure analysis:")?;
        match self {
            StructureAnalysis::Messages { count, samples } => {
                writeln!(f, "- Found {} chat messages", count)?;
                for (index, items, labels) in samples {
                    writeln!(
                        f,
                        "  - Message {}: {} content items, types: [{}]",
                        index,
                        items,
                        labels.join(", ")
                    )?;
                }
            }
            StructureAnalysis::NoMessages { keys } => {
                writeln!(f, "- No 'chat_messages' key found")?;
                writeln!(f, "- Available keys: [{}]", keys.join(", "))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(title: &str, site: &str) -> ResultRecord {
        ResultRecord {
            title: title.into(),
            url: "U".into(),
            site_name: site.into(),
            favicon_url: MISSING.into(),
            found_at: None,
        }
    }

    #[test]
    fn stats_count_domains_and_titles() {
        let records = vec![
            record("a", "example.com"),
            record(MISSING, "example.com"),
            record("c", MISSING),
            record("d", MISSING),
        ];
        let stats = ExtractionStats::from_records(&records);
        assert_eq!(stats, ExtractionStats { unique_domains: 2, total_urls: 4, urls_with_titles: 3 });
        assert_eq!(ExtractionStats::from_records(&[]).unique_domains, 0);
    }

    #[test]
    fn summary_names_method() {
        let result = ExtractionResult { records: vec![record("a", "s")], method: ExtractionMethod::DirectPath };
        assert_eq!(summary_line(&result), "Found 1 web results using direct path extraction");
    }

    #[test]
    fn analysis_of_messages() {
        let doc = json!({"chat_messages": [
            {"content": [{"type": "text"}, {"no_type": true}, "plain", null]},
            "not an object",
            {"sender": "human"},
            {"content": []},
            {}, {}, {"content": [{"type": "tool_use"}]}
        ]});
        let analysis = StructureAnalysis::from_value(&doc);
        assert_eq!(
            analysis,
            StructureAnalysis::Messages {
                count: 7,
                samples: vec![
                    (0, 4, vec!["text".into(), "unknown".into(), "string".into(), "null".into()]),
                    (3, 0, vec![]),
                ],
            }
        );
        assert!(analysis.to_string().contains("Message 0: 4 content items, types: [text, unknown, string, null]"));
    }

    #[test]
    fn analysis_without_messages_lists_keys() {
        let analysis = StructureAnalysis::from_value(&json!({"uuid": "x", "name": "y"}));
        assert_eq!(analysis, StructureAnalysis::NoMessages { keys: vec!["uuid".into(), "name".into()] });
        assert!(analysis.to_string().contains("Available keys: [uuid, name]"));
    }
}
