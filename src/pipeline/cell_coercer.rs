// ==========================================
// Hệ thống mẻ thép - cell value coercer
// ==========================================
// Turns raw cells of unknown shape (Excel serials, native date-times,
// free text) into canonical strings. Total: always returns *some*
// string; validity is judged by the row parser and temporal resolver.
// ==========================================

use crate::domain::heat::CellValue;
use chrono::{Duration, NaiveDate};

// Excel date serial epoch (the 1900 system, with its phantom leap day
// already absorbed: serial 1 = 1899-12-31).
fn excel_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).expect("fixed epoch")
}

pub struct CellCoercer;

impl CellCoercer {
    /// Coerce a cell in time context to `HH:MM` (24-hour, zero-padded).
    ///
    /// # Rules
    /// - Empty → `""`
    /// - Number in (0,1) → fraction of a day, seconds truncated
    /// - Number > 1 → date serial, rendered `YYYY-MM-DD` (the row parser
    ///   will flag it; a date is not a time of day)
    /// - Native date-time → its clock time
    /// - Text → trimmed verbatim
    pub fn coerce_time(cell: &CellValue) -> String {
        match cell {
            CellValue::Empty => String::new(),
            CellValue::Number(n) if *n > 0.0 && *n < 1.0 => Self::fraction_to_hhmm(*n),
            CellValue::Number(n) if *n > 1.0 => Self::serial_to_date(*n),
            CellValue::Number(n) => n.to_string(),
            CellValue::DateTime(dt) => dt.format("%H:%M").to_string(),
            CellValue::Text(s) => s.trim().to_string(),
        }
    }

    /// Coerce a cell in date context to `YYYY-MM-DD`.
    pub fn coerce_date(cell: &CellValue) -> String {
        match cell {
            CellValue::Empty => String::new(),
            CellValue::Number(n) if *n > 0.0 && *n < 1.0 => Self::fraction_to_hhmm(*n),
            CellValue::Number(n) if *n > 1.0 => Self::serial_to_date(*n),
            CellValue::Number(n) => n.to_string(),
            CellValue::DateTime(dt) => dt.format("%Y-%m-%d").to_string(),
            CellValue::Text(s) => s.trim().to_string(),
        }
    }

    /// Coerce a cell in plain-text context (heat id, grade, unit code).
    /// Integral numbers lose their trailing `.0` so a numeric heat id
    /// like 7090 round-trips as "7090".
    pub fn coerce_text(cell: &CellValue) -> String {
        match cell {
            CellValue::Empty => String::new(),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", *n as i64)
            }
            CellValue::Number(n) => n.to_string(),
            CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
            CellValue::Text(s) => s.trim().to_string(),
        }
    }

    /// Coerce an explicit sequence-number cell. Unparseable values are
    /// treated as absent, not as errors.
    pub fn coerce_seq_num(cell: &CellValue) -> Option<i64> {
        match cell {
            CellValue::Number(n) => Some(n.trunc() as i64),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().map(|f| f.trunc() as i64))
            }
            _ => None,
        }
    }

    // Fraction of a day → HH:MM. Rounded to whole seconds first to
    // absorb float noise (1/3 of a day must read 08:00, not 07:59), then
    // seconds truncated.
    fn fraction_to_hhmm(fraction: f64) -> String {
        let total_seconds = (fraction * 86_400.0).round() as i64;
        let minutes = (total_seconds / 60).rem_euclid(24 * 60);
        format!("{:02}:{:02}", minutes / 60, minutes % 60)
    }

    // Date serial (whole days since the 1899-12-30 epoch) → YYYY-MM-DD.
    // Out-of-range serials fall back to the raw number; validity checks
    // happen downstream.
    fn serial_to_date(serial: f64) -> String {
        let days = serial.trunc() as i64;
        match excel_epoch().checked_add_signed(Duration::days(days)) {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => serial.to_string(),
        }
    }
}
