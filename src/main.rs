// src/main.rs
mod document;
mod extractors;
mod report;
mod storage;
mod utils;

use clap::Parser;
use document::DocumentInfo;
use extractors::{JsonPath, WebResultExtractor, DEFAULT_DIRECT_PATH_STR};
use report::{ExtractionStats, StructureAnalysis};
use serde_json::Value;
use std::path::PathBuf;
use storage::{ExportFormat, StorageManager};
use utils::AppError;

/// Extracts web search results (title, URL, site name, favicon) from a chat export
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Conversation export JSON file ("-" reads stdin)
    input: PathBuf,

    /// Output directory for exported files
    #[arg(short, long, default_value = "./output", env = "WEBSEARCH_OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Export format for the result rows
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Xlsx)]
    format: ExportFormat,

    /// File name (without extension) for exported files
    #[arg(long, default_value = "web_metadata")]
    file_name: String,

    /// Location checked before falling back to a full scan
    #[arg(long, default_value = DEFAULT_DIRECT_PATH_STR, env = "WEBSEARCH_DIRECT_PATH")]
    direct_path: String,

    /// Print results only, write no files
    #[arg(long)]
    no_export: bool,

    /// Do not print the result table
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting extraction for args: {:?}", args);

    if args.file_name.is_empty() || args.file_name.contains(|c: char| c == '/' || c == '\\') {
        return Err(AppError::Config(format!(
            "File name '{}' must be non-empty and contain no path separators",
            args.file_name
        )));
    }
    let coordinate: JsonPath = args.direct_path.parse()?;
    tracing::debug!("Direct path set to {}", coordinate);

    // 3. Load the document; invalid JSON stops here
    let (document, info) = document::load_document(&args.input)?;
    tracing::info!(
        "Loaded document: {} chat messages, {} characters",
        info.chat_messages,
        info.size_chars
    );
    if let Some(uuid) = &info.uuid {
        tracing::info!("Conversation ID: {}", uuid);
    }
    if let Some(name) = &info.name {
        tracing::info!("Conversation name: {}", name);
    }

    let outcome = extract_and_export(&args, coordinate, &document, &info);
    document::release(document);
    outcome
}

fn extract_and_export(
    args: &Args,
    coordinate: JsonPath,
    document: &Value,
    info: &DocumentInfo,
) -> Result<(), AppError> {
    // 4. Extract
    let extractor = WebResultExtractor::new(coordinate);
    let result = extractor.extract(document);

    if result.is_empty() {
        if !args.quiet {
            println!("{}", report::summary_line(&result));
            print!("{}", StructureAnalysis::from_value(document));
        }
        return Ok(());
    }

    // 5. Present
    let stats = ExtractionStats::from_records(&result.records);
    if !args.quiet {
        println!("{}", report::summary_line(&result));
        println!();
        print!("{}", report::render_table(&result.records));
        println!();
        println!("{}", stats);
    }

    // 6. Export
    if args.no_export {
        tracing::info!("Export disabled, no files written");
        return Ok(());
    }

    let storage = StorageManager::new(&args.output_dir)?;
    let records_path = storage.save_records(&result, args.format, &args.file_name)?;
    let meta_path = storage.save_metadata(&result, info, &stats, &args.input, &args.file_name)?;

    tracing::info!(
        "Extraction finished ({}). Records: {}, metadata: {}",
        result.method,
        records_path.display(),
        meta_path.display()
    );

    Ok(())
}
