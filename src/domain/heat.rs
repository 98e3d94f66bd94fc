// ==========================================
// Hệ thống mẻ thép - heat domain model
// ==========================================
// RawRow (row-parser output) → Operation → Heat → ParseOutcome
// ==========================================

use crate::domain::types::StageGroup;
use crate::domain::validation::ValidationError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// CellValue - one raw spreadsheet cell
// ==========================================
// The shape delivered by the ingestion boundary: a cell is empty, a
// number (possibly an Excel date/time serial), free text, or a native
// date-time. The cell coercer turns all of these into canonical strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", tag = "type", content = "value")]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

// ==========================================
// RawRow - one canonical input record
// ==========================================
// Produced by the row parser, immutable afterwards. Time fields are
// canonical zero-padded HH:MM, which keeps the lexical parse-order
// comparator in the grouper valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    pub date_str: Option<String>, // canonical YYYY-MM-DD or source text
    pub heat_id: String,
    pub steel_grade: String,
    pub unit: String, // device code, trimmed and upper-cased
    pub start_str: String,
    pub end_str: String,
    pub seq_num: Option<i64>, // explicit sequence number, when supplied
    pub raw_index: usize,     // 1-based original sheet position
}

// ==========================================
// Operation - one stage visit by a heat
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub unit: String,
    pub group: StageGroup,
    /// Tie-break order: explicit input sequence number when present,
    /// otherwise the unit's canonical stage order.
    pub sequence_order: i64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime, // always strictly after start_time
    pub duration_minutes: i64,
    /// Gap since the previous operation in the same heat; 0 for the first.
    pub idle_time_minutes: i64,
}

// ==========================================
// Heat - a production batch
// ==========================================
// Exists only if it passed every fatal validation rule; partial heats are
// never emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heat {
    pub heat_id: String,
    pub steel_grade: String,
    /// Sorted ascending by start_time.
    pub operations: Vec<Operation>,
    /// Unit of the last CASTER-group operation, if any.
    pub casting_machine: Option<String>,
    /// 1-based rank within the casting machine's production-day cohort.
    pub sequence_in_caster: Option<u32>,
    /// True iff at least one CASTER-group operation is present.
    pub is_complete: bool,
    pub total_duration_minutes: i64,
    pub total_idle_minutes: i64,
}

// ==========================================
// ParseOutcome - assembled pipeline result
// ==========================================
// `errors` carries every fatal and advisory entry collected during the
// run; consumers bucket them by `kind.is_fatal()` themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseOutcome {
    pub valid_heats: Vec<Heat>,
    pub errors: Vec<ValidationError>,
}

impl ParseOutcome {
    /// Serialize for the timeline front end.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
