// src/storage/mod.rs
use crate::document::DocumentInfo;
use crate::extractors::{ExtractionResult, COLUMNS};
use crate::report::ExtractionStats;
use crate::utils::error::StorageError;
use clap::ValueEnum;
use rust_xlsxwriter::{Format, Workbook};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Writes one row per record to `<stem>.<ext>` in the chosen format.
    pub fn save_records(
        &self,
        result: &ExtractionResult,
        format: ExportFormat,
        file_stem: &str,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}.{}", file_stem, format.extension()));

        match format {
            ExportFormat::Xlsx => write_xlsx(&file_path, result)?,
            ExportFormat::Csv => write_csv(&file_path, result)?,
            ExportFormat::Json => {
                let json = serde_json::to_string_pretty(&result.records)
                    .map_err(|e| StorageError::SerializationError(e.to_string()))?;
                fs::write(&file_path, json)?;
            }
        }

        tracing::info!("Saved {} records to {}", result.len(), file_path.display());
        Ok(file_path)
    }

    /// Saves metadata about the extraction run in JSON format
    pub fn save_metadata(
        &self,
        result: &ExtractionResult,
        info: &DocumentInfo,
        stats: &ExtractionStats,
        source: &Path,
        file_stem: &str,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_meta.json", file_stem));

        let metadata = serde_json::json!({
            "source": source.display().to_string(),
            "method": result.method,
            "record_count": result.len(),
            "stats": stats,
            "document": info,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }
}

fn export_columns(result: &ExtractionResult) -> &'static [&'static str] {
    if result.has_found_at() {
        &COLUMNS
    } else {
        &COLUMNS[..4]
    }
}

fn write_csv(path: &Path, result: &ExtractionResult) -> Result<(), StorageError> {
    let include_found_at = result.has_found_at();
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(export_columns(result))?;
    for record in &result.records {
        writer.write_record(record.cells(include_found_at))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_xlsx(path: &Path, result: &ExtractionResult) -> Result<(), StorageError> {
    let include_found_at = result.has_found_at();
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Sheet1")?;

    for (col, name) in export_columns(result).iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header)?;
    }
    for (row, record) in result.records.iter().enumerate() {
        for (col, cell) in record.cells(include_found_at).into_iter().enumerate() {
            worksheet.write_string(row as u32 + 1, col as u16, cell)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::{ExtractionMethod, ResultRecord};

    fn result(found_at: Option<&str>) -> ExtractionResult {
        ExtractionResult {
            records: vec![ResultRecord {
                title: "Rust, the language".into(),
                url: "https://www.rust-lang.org".into(),
                site_name: "rust-lang.org".into(),
                favicon_url: "N/A".into(),
                found_at: found_at.map(str::to_string),
            }],
            method: if found_at.is_some() {
                ExtractionMethod::RecursiveSearch
            } else {
                ExtractionMethod::DirectPath
            },
        }
    }

    #[test]
    fn creates_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        StorageManager::new(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn csv_quotes_and_orders_columns() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let path = storage.save_records(&result(None), ExportFormat::Csv, "web").unwrap();
        assert_eq!(path, dir.path().join("web.csv"));
        let text = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "title,url,site_name,favicon_url");
        assert_eq!(lines[1], "\"Rust, the language\",https://www.rust-lang.org,rust-lang.org,N/A");
    }

    #[test]
    fn csv_adds_found_at_for_scanner_results() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let path = storage.save_records(&result(Some("tool")), ExportFormat::Csv, "web").unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert_eq!(text.lines().next(), Some("title,url,site_name,favicon_url,found_at"));
        assert!(text.lines().nth(1).unwrap().ends_with(",tool"));
    }

    #[test]
    fn json_and_xlsx_exports_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();

        let json_path = storage.save_records(&result(None), ExportFormat::Json, "web").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(json_path).unwrap()).unwrap();
        assert_eq!(parsed[0]["site_name"], "rust-lang.org");
        assert!(parsed[0].get("found_at").is_none());

        let xlsx_path = storage.save_records(&result(None), ExportFormat::Xlsx, "web").unwrap();
        let bytes = fs::read(xlsx_path).unwrap();
        // xlsx is a zip container
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn metadata_carries_method_and_stats() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let res = result(Some("tool"));
        let info = DocumentInfo { chat_messages: 0, size_chars: 10, uuid: None, name: None };
        let stats = ExtractionStats::from_records(&res.records);
        let path = storage
            .save_metadata(&res, &info, &stats, Path::new("export.json"), "web")
            .unwrap();
        assert_eq!(path, dir.path().join("web_meta.json"));

        let meta: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(meta["method"], "recursive_search");
        assert_eq!(meta["record_count"], 1);
        assert_eq!(meta["stats"]["urls_with_titles"], 1);
        assert_eq!(meta["source"], "export.json");
        assert!(meta["extraction_timestamp"].is_string());
    }
}
