// ==========================================
// Hệ thống mẻ thép - domain layer
// ==========================================
// Entities and types shared by the whole pipeline; no business rules here.
// ==========================================

pub mod heat;
pub mod types;
pub mod validation;

pub use heat::{CellValue, Heat, Operation, ParseOutcome, RawRow};
pub use types::{ErrorKind, OverlapPolicy, ParseOptions, StageGroup};
pub use validation::ValidationError;
