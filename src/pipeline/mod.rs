// ==========================================
// Hệ thống mẻ thép - validation pipeline
// ==========================================
// Row parsing → grouping → temporal resolution → routing validation →
// derived fields → caster sequencing. Synchronous and pure over its
// input: no I/O, no shared state, deterministic output for identical
// rows.
// ==========================================

pub mod cell_coercer;
pub mod derive;
pub mod error;
pub mod grouper;
pub mod header_normalizer;
pub mod row_parser;
pub mod routing;
pub mod temporal;

pub use cell_coercer::CellCoercer;
pub use derive::{assign_caster_sequence, production_day, DerivedFieldCalculator};
pub use error::PipelineError;
pub use grouper::{HeatGroup, HeatGrouper};
pub use header_normalizer::HeaderNormalizer;
pub use row_parser::{ParsedRows, RowParser};
pub use routing::RoutingValidator;
pub use temporal::{ResolvedHeat, ResolvedOp, TemporalResolver};

use crate::domain::heat::{CellValue, Heat, ParseOutcome};
use crate::domain::types::ParseOptions;
use crate::domain::validation::ValidationError;
use std::collections::HashSet;
use tracing::{debug, info};

// ==========================================
// HeatPipeline - result assembler
// ==========================================
pub struct HeatPipeline;

impl HeatPipeline {
    /// Run the full pipeline over a raw grid (first row = headers).
    ///
    /// Malformed data never fails the call: it is classified into the
    /// outcome's error list. Only malformed structure (missing required
    /// columns, a sheet without data rows) aborts with a `PipelineError`.
    pub fn parse(
        grid: &[Vec<CellValue>],
        options: &ParseOptions,
    ) -> Result<ParseOutcome, PipelineError> {
        let parsed = RowParser::parse(grid)?;
        let total_rows = parsed.rows.len();

        // Heats poisoned at row level: fatal row errors (FORMAT/MISSING)
        // remove the whole heat, not just the offending row.
        let row_poisoned: HashSet<String> = parsed
            .errors
            .iter()
            .filter(|e| e.kind.is_fatal() && !e.heat_id.is_empty())
            .map(|e| e.heat_id.clone())
            .collect();

        let mut errors: Vec<ValidationError> = parsed.errors;
        let mut valid_heats: Vec<Heat> = Vec::new();

        let fallback_date = options
            .fallback_date
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        for group in HeatGrouper::group(parsed.rows) {
            let resolved = TemporalResolver::resolve(
                &group.heat_id,
                group
                    .rows
                    .first()
                    .map(|r| r.steel_grade.clone())
                    .unwrap_or_default(),
                &group.rows,
                fallback_date,
            );
            errors.extend(resolved.errors);

            let ops = RoutingValidator::sort_by_start_time(resolved.ops);
            let routing_errors =
                RoutingValidator::validate(&group.heat_id, &ops, options.overlap_policy);
            let routing_failed = !routing_errors.is_empty();
            errors.extend(routing_errors);

            if resolved.poisoned || routing_failed || row_poisoned.contains(&group.heat_id) {
                debug!(heat_id = %group.heat_id, "heat dropped by validation");
                continue;
            }
            if ops.is_empty() {
                // Every row was excluded as an unknown unit; there is no
                // schedule left to emit for this heat.
                debug!(heat_id = %group.heat_id, "heat has no resolvable operations");
                continue;
            }

            valid_heats.push(DerivedFieldCalculator::finalize(
                resolved.heat_id,
                resolved.steel_grade,
                ops,
            ));
        }

        let valid_heats = assign_caster_sequence(valid_heats);

        let advisory = errors.iter().filter(|e| !e.kind.is_fatal()).count();
        info!(
            rows = total_rows,
            valid_heats = valid_heats.len(),
            fatal_errors = errors.len() - advisory,
            warnings = advisory,
            "parse complete"
        );

        Ok(ParseOutcome {
            valid_heats,
            errors,
        })
    }
}
