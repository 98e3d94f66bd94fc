// ==========================================
// Hệ thống trực quan hóa tiến trình mẻ thép - core library
// ==========================================
// Validation & transformation pipeline for melt-shop heat timelines:
// tabular production records in, temporally-consistent heat schedules
// and a classified error stream out. File ingestion and chart rendering
// live outside this crate; see the ingest boundary in `ingest`.
// ==========================================

// Initialize internationalization (Vietnamese default, English available)
rust_i18n::i18n!("locales", fallback = "vi");

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and types
pub mod domain;

// Static configuration - unit table, header aliases
pub mod config;

// Pipeline - validation & transformation core
pub mod pipeline;

// Ingest layer - Excel/CSV to raw grid
pub mod ingest;

// Logging
pub mod logging;

// Internationalization
pub mod i18n;

// ==========================================
// Core type re-exports
// ==========================================

pub use domain::{
    CellValue, ErrorKind, Heat, Operation, OverlapPolicy, ParseOptions, ParseOutcome, RawRow,
    StageGroup, ValidationError,
};

pub use pipeline::{assign_caster_sequence, production_day, HeatPipeline, PipelineError};

pub use ingest::{IngestError, UniversalFileParser};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "Hệ thống trực quan hóa tiến trình mẻ thép";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
