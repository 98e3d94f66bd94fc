// ==========================================
// Hệ thống mẻ thép - blocking pipeline errors
// ==========================================
// Malformed *structure* aborts the whole parse; malformed *data* never
// does (it becomes ValidationError entries instead).
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// No column maps to one or more required canonical fields. Reported
    /// once per parse, naming the canonical fields, never per row.
    #[error("missing required columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// The sheet has no data rows after the header.
    #[error("sheet contains no data rows")]
    EmptySheet,
}
