// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Failures while turning raw input into a document.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON document: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Unterminated bracket at offset {0}")]
    UnterminatedBracket(usize),

    #[error("Invalid index '{0}'")]
    InvalidIndex(String),

    #[error("Empty key at offset {0}")]
    EmptyKey(usize),

    #[error("Invalid quoted key: {0}")]
    InvalidQuotedKey(String),

    #[error("Unexpected character '{0}' at offset {1}")]
    UnexpectedChar(char, usize),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid direct path: {0}")]
    Path(#[from] PathError),

    #[error("Failed to load document: {0}")]
    Load(#[from] LoadError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
