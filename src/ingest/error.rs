// ==========================================
// Hệ thống mẻ thép - ingest error types
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    // ===== file errors =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file format: {0} (expected .xlsx/.xls/.csv)")]
    UnsupportedFormat(String),

    #[error("file read failed: {0}")]
    FileReadError(String),

    // ===== parser errors =====
    #[error("Excel parse failed: {0}")]
    ExcelParseError(String),

    #[error("CSV parse failed: {0}")]
    CsvParseError(String),

    // ===== generic =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        IngestError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        IngestError::CsvParseError(err.to_string())
    }
}

/// Result alias for the ingest layer.
pub type IngestResult<T> = Result<T, IngestError>;
