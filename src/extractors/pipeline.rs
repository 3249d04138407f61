// src/extractors/pipeline.rs
use crate::extractors::direct::DirectLocator;
use crate::extractors::path::JsonPath;
use crate::extractors::record::ResultRecord;
use crate::extractors::recursive::RecursiveScanner;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Which lookup produced the records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    DirectPath,
    RecursiveSearch,
    NoResults,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::DirectPath => "direct_path",
            ExtractionMethod::RecursiveSearch => "recursive_search",
            ExtractionMethod::NoResults => "no_results",
        }
    }
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A way of finding web search records in a document.
pub trait SearchStrategy {
    /// Human-readable label for logs.
    fn name(&self) -> &'static str;

    /// Tag reported when this strategy is the one that produced records.
    fn method(&self) -> ExtractionMethod;

    /// Records in discovery order. Shape problems yield an empty vec, never an error.
    fn search(&self, document: &Value) -> Vec<ResultRecord>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    pub records: Vec<ResultRecord>,
    pub method: ExtractionMethod,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether any record carries a `found_at` column.
    pub fn has_found_at(&self) -> bool {
        self.records.iter().any(|r| r.found_at.is_some())
    }
}

/// Runs strategies in order and keeps the first non-empty answer.
pub struct WebResultExtractor {
    strategies: Vec<Box<dyn SearchStrategy>>,
}

impl WebResultExtractor {
    /// Direct lookup at `coordinate`, then the full-document scan.
    pub fn new(coordinate: JsonPath) -> Self {
        Self {
            strategies: vec![
                Box::new(DirectLocator::new(coordinate)),
                Box::new(RecursiveScanner::new()),
            ],
        }
    }

    pub fn extract(&self, document: &Value) -> ExtractionResult {
        for strategy in &self.strategies {
            let records = strategy.search(document);
            if !records.is_empty() {
                tracing::info!(
                    "Found {} web results using {} ({})",
                    records.len(),
                    strategy.name(),
                    strategy.method()
                );
                return ExtractionResult { records, method: strategy.method() };
            }
            tracing::debug!("{} found nothing, falling back", strategy.name());
        }

        tracing::warn!("No web search results found in document");
        ExtractionResult { records: Vec::new(), method: ExtractionMethod::NoResults }
    }
}

impl Default for WebResultExtractor {
    fn default() -> Self {
        Self::new(DirectLocator::default().coordinate().clone())
    }
}
