// ==========================================
// Hệ thống mẻ thép - temporal resolver
// ==========================================
// Turns per-row HH:MM strings into absolute timestamps, applying the
// overnight-rollover heuristic. Modeled as an explicit fold carrying
// {last_end_time, ops} so each heat resolves independently and the fold
// step tests in isolation.
// ==========================================

use crate::config::units::lookup_unit;
use crate::domain::heat::RawRow;
use crate::domain::types::StageGroup;
use crate::domain::validation::ValidationError;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

// ==========================================
// ResolvedOp - pipeline-internal operation
// ==========================================
// Carries the raw sheet position for error reporting; the derived-field
// calculator strips it when assembling the public Operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOp {
    pub unit: String,
    pub group: StageGroup,
    pub sequence_order: i64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub raw_index: usize,
}

// ==========================================
// ResolvedHeat
// ==========================================
#[derive(Debug, Clone)]
pub struct ResolvedHeat {
    pub heat_id: String,
    pub steel_grade: String,
    /// Still in parse order; the routing validator re-sorts by start time.
    pub ops: Vec<ResolvedOp>,
    pub errors: Vec<ValidationError>,
    /// True once any row hit a fatal parse error; the heat is dropped
    /// whole, but sibling rows are still parsed to classify them.
    pub poisoned: bool,
}

// Fold accumulator for one heat.
struct FoldState {
    last_end_time: Option<NaiveDateTime>,
    ops: Vec<ResolvedOp>,
}

pub struct TemporalResolver;

impl TemporalResolver {
    /// Resolve one heat's rows (already in parse order) against absolute
    /// time.
    ///
    /// # Rules
    /// - Unknown unit → advisory UNIT warning, row excluded.
    /// - Per-row base date: the row's own parseable date, else the heat
    ///   base date (first dated row, else `fallback_date`).
    /// - A start more than half a day behind the previous operation's
    ///   end rolls one day forward (overnight shift); an end earlier
    ///   than its own start always rolls.
    /// - Bad hour/minute values → fatal FORMAT; resolved end <= start →
    ///   fatal TIME.
    pub fn resolve(
        heat_id: &str,
        steel_grade: String,
        rows: &[RawRow],
        fallback_date: NaiveDate,
    ) -> ResolvedHeat {
        let mut errors = Vec::new();
        let mut poisoned = false;

        // Heat base date: the first row carrying a date. A present but
        // unparseable base date is a fatal FORMAT error for the heat.
        let base_date = match Self::heat_base_date(rows, fallback_date) {
            Ok(date) => date,
            Err((value, raw_index)) => {
                errors.push(ValidationError::bad_base_date(heat_id, &value, raw_index));
                return ResolvedHeat {
                    heat_id: heat_id.to_string(),
                    steel_grade,
                    ops: Vec::new(),
                    errors,
                    poisoned: true,
                };
            }
        };

        let mut state = FoldState {
            last_end_time: None,
            ops: Vec::new(),
        };

        for row in rows {
            match Self::resolve_row(heat_id, row, base_date, &state, &mut errors) {
                RowOutcome::Op(op) => {
                    state.last_end_time = Some(op.end_time);
                    state.ops.push(op);
                }
                RowOutcome::Skipped => {}
                RowOutcome::Fatal => poisoned = true,
            }
        }

        ResolvedHeat {
            heat_id: heat_id.to_string(),
            steel_grade,
            ops: state.ops,
            errors,
            poisoned,
        }
    }

    // One fold step. Pushes its classification into `errors` and reports
    // whether the row produced an operation, was advisory-skipped, or
    // poisoned the heat.
    fn resolve_row(
        heat_id: &str,
        row: &RawRow,
        base_date: NaiveDate,
        state: &FoldState,
        errors: &mut Vec<ValidationError>,
    ) -> RowOutcome {
        let info = match lookup_unit(&row.unit) {
            Some(info) => info,
            None => {
                errors.push(ValidationError::unknown_unit(
                    heat_id,
                    &row.unit,
                    row.raw_index,
                ));
                return RowOutcome::Skipped;
            }
        };

        // The row's own date overrides the heat base date when parseable.
        let row_date = row
            .date_str
            .as_deref()
            .and_then(Self::parse_date)
            .unwrap_or(base_date);

        let start_tod = match Self::parse_hhmm(&row.start_str) {
            Some(t) => t,
            None => {
                errors.push(ValidationError::bad_time_value(
                    heat_id,
                    &row.unit,
                    &row.start_str,
                    row.raw_index,
                ));
                return RowOutcome::Fatal;
            }
        };
        let end_tod = match Self::parse_hhmm(&row.end_str) {
            Some(t) => t,
            None => {
                errors.push(ValidationError::bad_time_value(
                    heat_id,
                    &row.unit,
                    &row.end_str,
                    row.raw_index,
                ));
                return RowOutcome::Fatal;
            }
        };

        let mut start_time = row_date.and_time(start_tod);
        if let Some(last_end) = state.last_end_time {
            // Overnight shift: a start far behind the previous end means
            // the clock wrapped past midnight (23:00 → 01:00). A small
            // reversal is a genuine overlap and must reach the routing
            // validator unchanged.
            if start_time < last_end && last_end - start_time > Duration::hours(12) {
                start_time = start_time + Duration::days(1);
            }
        }

        let mut end_time = start_time.date().and_time(end_tod);
        if end_time < start_time {
            end_time = end_time + Duration::days(1);
        }

        if end_time <= start_time {
            errors.push(ValidationError::end_not_after_start(
                heat_id,
                &row.unit,
                row.raw_index,
            ));
            return RowOutcome::Fatal;
        }

        RowOutcome::Op(ResolvedOp {
            unit: row.unit.clone(),
            group: info.group,
            sequence_order: row.seq_num.unwrap_or(info.canonical_order),
            start_time,
            end_time,
            raw_index: row.raw_index,
        })
    }

    // First row with a date decides the heat base date; on parse failure
    // the offending value is returned for the error report.
    fn heat_base_date(
        rows: &[RawRow],
        fallback_date: NaiveDate,
    ) -> Result<NaiveDate, (String, usize)> {
        for row in rows {
            if let Some(value) = row.date_str.as_deref() {
                return Self::parse_date(value).ok_or((value.to_string(), row.raw_index));
            }
        }
        Ok(fallback_date)
    }

    fn parse_date(value: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(value, "%d/%m/%Y"))
            .or_else(|_| NaiveDate::parse_from_str(value, "%Y%m%d"))
            .ok()
    }

    // Canonical HH:MM with real range checks (the row parser only
    // checked the shape).
    fn parse_hhmm(value: &str) -> Option<NaiveTime> {
        let (hours, minutes) = value.split_once(':')?;
        let h: u32 = hours.parse().ok()?;
        let m: u32 = minutes.parse().ok()?;
        NaiveTime::from_hms_opt(h, m, 0)
    }
}

enum RowOutcome {
    Op(ResolvedOp),
    Skipped,
    Fatal,
}
