// ==========================================
// Hệ thống mẻ thép - row parser
// ==========================================
// Applies the header normalizer and cell coercer to turn a raw 2D grid
// into canonical rows, filtering placeholder and malformed rows into the
// error stream.
// ==========================================

use crate::config::headers::CanonicalField;
use crate::domain::heat::{CellValue, RawRow};
use crate::domain::validation::ValidationError;
use crate::pipeline::cell_coercer::CellCoercer;
use crate::pipeline::error::PipelineError;
use crate::pipeline::header_normalizer::HeaderNormalizer;
use std::collections::HashMap;

// ==========================================
// ParsedRows
// ==========================================
/// Surviving rows plus every row-level error, in original order. Fatal
/// entries (FORMAT / MISSING) poison their heat downstream; advisory
/// entries (PLACEHOLDER) are informational.
#[derive(Debug, Clone)]
pub struct ParsedRows {
    pub rows: Vec<RawRow>,
    pub errors: Vec<ValidationError>,
}

pub struct RowParser;

impl RowParser {
    /// Parse a grid whose first row is the header row.
    ///
    /// # Row classification
    /// 1. Rows with every cell empty are skipped silently.
    /// 2. `unit == "0"`, or both times `"00:00"` → PLACEHOLDER, dropped.
    /// 3. Empty heat id / unit / start / end → MISSING, dropped.
    /// 4. A present time failing the `H:MM`/`HH:MM` shape → FORMAT, dropped.
    ///
    /// Valid `H:MM` input is canonicalized to zero-padded `HH:MM`; the
    /// grouper's lexical ordering depends on that fixed width.
    pub fn parse(grid: &[Vec<CellValue>]) -> Result<ParsedRows, PipelineError> {
        if grid.len() < 2 {
            return Err(PipelineError::EmptySheet);
        }

        let headers: Vec<String> = grid[0].iter().map(CellCoercer::coerce_text).collect();
        let columns = HeaderNormalizer::map_columns(&headers)?;

        let mut rows = Vec::new();
        let mut errors = Vec::new();

        for (i, cells) in grid[1..].iter().enumerate() {
            let raw_index = i + 2; // 1-based sheet position, header is row 1

            if cells.iter().all(CellValue::is_empty) {
                continue;
            }

            let fields = Self::coerce_row(cells, &columns);
            let heat_id = fields.text(CanonicalField::HeatId);
            let unit = fields.text(CanonicalField::Unit).to_uppercase();
            let start_str = fields.text(CanonicalField::StartStr);
            let end_str = fields.text(CanonicalField::EndStr);

            // Placeholder rows mark planned-but-unused slots in the shift report.
            if unit == "0" || (start_str == "00:00" && end_str == "00:00") {
                errors.push(ValidationError::placeholder_row(&heat_id, raw_index));
                continue;
            }

            if let Some(field) = Self::first_missing(&heat_id, &unit, &start_str, &end_str) {
                errors.push(ValidationError::missing_field(&heat_id, field, raw_index));
                continue;
            }

            let start_str = match Self::canonicalize_time(&start_str) {
                Some(s) => s,
                None => {
                    errors.push(ValidationError::bad_time_format(
                        &heat_id, "startStr", &start_str, raw_index,
                    ));
                    continue;
                }
            };
            let end_str = match Self::canonicalize_time(&end_str) {
                Some(s) => s,
                None => {
                    errors.push(ValidationError::bad_time_format(
                        &heat_id, "endStr", &end_str, raw_index,
                    ));
                    continue;
                }
            };

            rows.push(RawRow {
                date_str: fields.optional_text(CanonicalField::DateStr),
                heat_id,
                steel_grade: fields.text(CanonicalField::SteelGrade),
                unit,
                start_str,
                end_str,
                seq_num: fields.seq_num,
                raw_index,
            });
        }

        Ok(ParsedRows { rows, errors })
    }

    // Coerce every mapped column of one data row.
    fn coerce_row(cells: &[CellValue], columns: &HashMap<usize, CanonicalField>) -> CoercedFields {
        let empty = CellValue::Empty;
        let mut fields = CoercedFields::default();
        for (idx, field) in columns {
            // Rows may be shorter than the header row
            let cell = cells.get(*idx).unwrap_or(&empty);
            match field {
                CanonicalField::DateStr => fields.date_str = CellCoercer::coerce_date(cell),
                CanonicalField::StartStr => fields.start_str = CellCoercer::coerce_time(cell),
                CanonicalField::EndStr => fields.end_str = CellCoercer::coerce_time(cell),
                CanonicalField::SeqNum => fields.seq_num = CellCoercer::coerce_seq_num(cell),
                CanonicalField::HeatId => fields.heat_id = CellCoercer::coerce_text(cell),
                CanonicalField::SteelGrade => fields.steel_grade = CellCoercer::coerce_text(cell),
                CanonicalField::Unit => fields.unit = CellCoercer::coerce_text(cell),
            }
        }
        fields
    }

    // Required-on-row fields; steel grade may legitimately be blank.
    fn first_missing(
        heat_id: &str,
        unit: &str,
        start_str: &str,
        end_str: &str,
    ) -> Option<&'static str> {
        if heat_id.is_empty() {
            Some("heatId")
        } else if unit.is_empty() {
            Some("unit")
        } else if start_str.is_empty() {
            Some("startStr")
        } else if end_str.is_empty() {
            Some("endStr")
        } else {
            None
        }
    }

    /// Accept `H:MM` / `HH:MM` (1-2 digit hours, 2-digit minutes) and
    /// return the zero-padded form. Shape only; hour/minute ranges are
    /// the temporal resolver's concern.
    fn canonicalize_time(value: &str) -> Option<String> {
        let (hours, minutes) = value.split_once(':')?;
        if hours.is_empty() || hours.len() > 2 || !hours.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if minutes.len() != 2 || !minutes.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(format!("{hours:0>2}:{minutes}"))
    }
}

// Per-row coercion scratch space.
#[derive(Debug, Default)]
struct CoercedFields {
    heat_id: String,
    steel_grade: String,
    unit: String,
    start_str: String,
    end_str: String,
    date_str: String,
    seq_num: Option<i64>,
}

impl CoercedFields {
    fn text(&self, field: CanonicalField) -> String {
        match field {
            CanonicalField::HeatId => self.heat_id.clone(),
            CanonicalField::SteelGrade => self.steel_grade.clone(),
            CanonicalField::Unit => self.unit.clone(),
            CanonicalField::StartStr => self.start_str.clone(),
            CanonicalField::EndStr => self.end_str.clone(),
            CanonicalField::DateStr => self.date_str.clone(),
            CanonicalField::SeqNum => String::new(),
        }
    }

    fn optional_text(&self, field: CanonicalField) -> Option<String> {
        let value = self.text(field);
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}
