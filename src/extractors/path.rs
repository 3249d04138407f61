// src/extractors/path.rs

// --- Imports ---
use crate::utils::error::PathError;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// --- Data Structures ---
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a node inside a JSON document, e.g. `chat_messages[3].content[2]`.
///
/// The empty path is the document root. Keys that would make the text form
/// ambiguous are written as `["quoted"]` using JSON string escaping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn child_key(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.to_string()));
        Self { segments }
    }

    pub fn child_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Follows the path from `root`. Missing keys, out-of-range indices and
    /// container mismatches all yield `None`.
    pub fn resolve<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        self.segments.iter().try_fold(root, |node, segment| match segment {
            PathSegment::Key(key) => node.as_object()?.get(key),
            PathSegment::Index(index) => node.as_array()?.get(*index),
        })
    }
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '.' | '[' | ']' | '"')
}

fn needs_quoting(key: &str) -> bool {
    key.is_empty() || key.chars().any(is_delimiter)
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
                PathSegment::Key(key) if needs_quoting(key) => {
                    let quoted = serde_json::to_string(key).map_err(|_| fmt::Error)?;
                    write!(f, "[{}]", quoted)?;
                }
                PathSegment::Key(key) if position == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
            }
        }
        Ok(())
    }
}

impl FromStr for JsonPath {
    type Err = PathError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut segments = Vec::new();
        let mut pos = 0;

        while pos < text.len() {
            let rest = &text[pos..];

            if let Some(after) = rest.strip_prefix('[') {
                let (segment, consumed) = parse_bracket(after, pos)?;
                segments.push(segment);
                pos += 1 + consumed;
                continue;
            }

            // Bare keys: the first one stands alone, later ones follow a dot.
            let body = if segments.is_empty() {
                rest
            } else if let Some(body) = rest.strip_prefix('.') {
                pos += 1;
                body
            } else {
                let c = rest.chars().next().unwrap_or_default();
                return Err(PathError::UnexpectedChar(c, pos));
            };

            let end = body.find(is_delimiter).unwrap_or(body.len());
            if end == 0 {
                return Err(match body.chars().next() {
                    Some(c @ (']' | '"')) => PathError::UnexpectedChar(c, pos),
                    _ => PathError::EmptyKey(pos),
                });
            }
            segments.push(PathSegment::Key(body[..end].to_string()));
            pos += end;
        }

        Ok(Self { segments })
    }
}

/// Parses the inside of a bracket (text after `[`). Returns the segment and
/// the number of bytes consumed including the closing `]`.
fn parse_bracket(after: &str, open_offset: usize) -> Result<(PathSegment, usize), PathError> {
    if after.starts_with('"') {
        let mut escaped = false;
        let mut close = None;
        for (i, c) in after.char_indices().skip(1) {
            if escaped {
                escaped = false;
                continue;
            }
            match c {
                '\\' => escaped = true,
                '"' => {
                    close = Some(i);
                    break;
                }
                _ => {}
            }
        }
        let close = close.ok_or(PathError::UnterminatedBracket(open_offset))?;
        let key: String = serde_json::from_str(&after[..=close])
            .map_err(|e| PathError::InvalidQuotedKey(e.to_string()))?;
        if !after[close + 1..].starts_with(']') {
            return Err(PathError::UnterminatedBracket(open_offset));
        }
        return Ok((PathSegment::Key(key), close + 2));
    }

    let close = after.find(']').ok_or(PathError::UnterminatedBracket(open_offset))?;
    let digits = &after[..close];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PathError::InvalidIndex(digits.to_string()));
    }
    let index = digits
        .parse::<usize>()
        .map_err(|_| PathError::InvalidIndex(digits.to_string()))?;
    Ok((PathSegment::Index(index), close + 1))
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(k: &str) -> PathSegment {
        PathSegment::Key(k.to_string())
    }

    #[test]
    fn renders_keys_and_indices() {
        let path = JsonPath::root().child_key("a").child_key("b").child_index(2);
        assert_eq!(path.to_string(), "a.b[2]");
        assert_eq!(JsonPath::root().to_string(), "");
        assert_eq!(JsonPath::root().child_index(0).child_key("x").to_string(), "[0].x");
    }

    #[test]
    fn parses_back_to_segments() {
        let path: JsonPath = "a.b[2]".parse().unwrap();
        assert_eq!(path, JsonPath::from_segments(vec![key("a"), key("b"), PathSegment::Index(2)]));

        let root: JsonPath = "".parse().unwrap();
        assert_eq!(root, JsonPath::root());
    }

    #[test]
    fn awkward_keys_are_quoted_and_round_trip() {
        let path = JsonPath::root()
            .child_key("site.name")
            .child_index(7)
            .child_key("")
            .child_key("say \"hi\" [now]");
        let text = path.to_string();
        assert_eq!(text, r#"["site.name"][7][""]["say \"hi\" [now]"]"#);
        let parsed: JsonPath = text.parse().unwrap();
        assert_eq!(parsed, path);
    }

    #[test]
    fn rejects_malformed_text() {
        assert_eq!("a[3".parse::<JsonPath>(), Err(PathError::UnterminatedBracket(1)));
        assert_eq!("a[x]".parse::<JsonPath>(), Err(PathError::InvalidIndex("x".into())));
        assert_eq!("a[+1]".parse::<JsonPath>(), Err(PathError::InvalidIndex("+1".into())));
        assert_eq!("a..b".parse::<JsonPath>(), Err(PathError::EmptyKey(2)));
        assert_eq!("a[0]b".parse::<JsonPath>(), Err(PathError::UnexpectedChar('b', 4)));
        assert!(matches!("[\"open".parse::<JsonPath>(), Err(PathError::UnterminatedBracket(0))));
    }

    #[test]
    fn resolve_never_panics_on_mismatch() {
        let doc = json!({"chat_messages": [{"content": ["x"]}]});
        let hit: JsonPath = "chat_messages[0].content[0]".parse().unwrap();
        assert_eq!(hit.resolve(&doc), Some(&json!("x")));

        for miss in ["chat_messages[3]", "chat_messages.content", "chat_messages[0].content[0].deeper", "nope"] {
            let path: JsonPath = miss.parse().unwrap();
            assert_eq!(path.resolve(&doc), None, "expected no node at {}", miss);
        }
    }
}
