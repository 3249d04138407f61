// src/extractors/mod.rs
pub mod direct;
pub mod path;
pub mod pipeline;
pub mod record;
pub mod recursive;

// Re-export key extraction types for convenience
pub use direct::DEFAULT_DIRECT_PATH_STR;
pub use path::JsonPath;
pub use pipeline::{ExtractionMethod, ExtractionResult, WebResultExtractor};
pub use record::{ResultRecord, COLUMNS, MISSING};
