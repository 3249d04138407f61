// src/document/mod.rs
use crate::utils::error::LoadError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Reads and parses a JSON export. A path of `-` reads stdin.
pub fn load_document(source: &Path) -> Result<(Value, DocumentInfo), LoadError> {
    let text = if source == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|source| LoadError::Io { path: "-".into(), source })?;
        buffer
    } else {
        std::fs::read_to_string(source).map_err(|e| LoadError::Io {
            path: source.to_path_buf(),
            source: e,
        })?
    };

    tracing::debug!("Read {} bytes from {}", text.len(), source.display());
    let document = parse_document(&text)?;
    let info = DocumentInfo::new(&document, &text);
    Ok((document, info))
}

/// Parses JSON text. Invalid text is the only fatal input condition; nesting
/// depth is not limited.
pub fn parse_document(text: &str) -> Result<Value, LoadError> {
    let mut json = serde_json::Deserializer::from_str(text);
    json.disable_recursion_limit();
    let document = Value::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(document)
}

/// Tears a document down without recursing through nested containers.
pub fn release(document: Value) {
    let mut pending = vec![document];
    while let Some(mut node) = pending.pop() {
        match &mut node {
            Value::Array(items) => pending.append(items),
            Value::Object(map) => pending.extend(std::mem::take(map).into_iter().map(|(_, value)| value)),
            _ => {}
        }
    }
}

/// Basic facts about an uploaded conversation export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentInfo {
    pub chat_messages: usize,
    pub size_chars: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl DocumentInfo {
    /// `text` is the raw input the document was parsed from.
    pub fn new(document: &Value, text: &str) -> Self {
        let text_field = |key: &str| document.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            chat_messages: document
                .get("chat_messages")
                .and_then(Value::as_array)
                .map_or(0, Vec::len),
            size_chars: text.chars().count(),
            uuid: text_field("uuid"),
            name: text_field("name"),
        }
    }
}
