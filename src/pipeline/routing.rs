// ==========================================
// Hệ thống mẻ thép - routing & consistency validator
// ==========================================
// Enforces stage routing over the authoritative start-time order. Every
// violation here is fatal; the owning heat is dropped whole.
// ==========================================

use crate::domain::types::{OverlapPolicy, StageGroup};
use crate::domain::validation::ValidationError;
use crate::pipeline::temporal::ResolvedOp;

pub struct RoutingValidator;

impl RoutingValidator {
    /// Re-sort operations ascending by resolved start time. The sort is
    /// stable, so rows tied on start keep their parse order — the output
    /// is fully determined by the input.
    pub fn sort_by_start_time(mut ops: Vec<ResolvedOp>) -> Vec<ResolvedOp> {
        ops.sort_by_key(|op| op.start_time);
        ops
    }

    /// Validate one heat's sorted operations.
    ///
    /// # Rules
    /// - No operation may start before the previous one ends (TIME),
    ///   unless the tolerant overlap policy is active.
    /// - A heat may not visit two distinct units of the same group
    ///   (ROUTING). The LF group is exempt: revisiting ladle-furnace
    ///   stations in sequence is legitimate practice.
    /// - Any LF operation requires a BOF operation in the heat, and no
    ///   LF may start before the BOF ends (ROUTING).
    pub fn validate(
        heat_id: &str,
        ops: &[ResolvedOp],
        overlap_policy: OverlapPolicy,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if overlap_policy == OverlapPolicy::Reject {
            for (i, pair) in ops.windows(2).enumerate() {
                if pair[1].start_time < pair[0].end_time {
                    errors.push(ValidationError::overlapping_operations(
                        heat_id,
                        &pair[0].unit,
                        &pair[1].unit,
                        i + 1,
                    ));
                }
            }
        }

        Self::check_duplicate_groups(heat_id, ops, &mut errors);
        Self::check_lf_predecessor(heat_id, ops, &mut errors);

        errors
    }

    fn check_duplicate_groups(
        heat_id: &str,
        ops: &[ResolvedOp],
        errors: &mut Vec<ValidationError>,
    ) {
        let mut first_unit_of: Vec<(StageGroup, &str)> = Vec::new();

        for (i, op) in ops.iter().enumerate() {
            if op.group == StageGroup::Lf {
                continue;
            }
            match first_unit_of.iter().find(|(g, _)| *g == op.group) {
                None => first_unit_of.push((op.group, &op.unit)),
                Some((_, first_unit)) if *first_unit != op.unit => {
                    errors.push(ValidationError::duplicate_group(
                        heat_id,
                        &op.group.to_string(),
                        first_unit,
                        &op.unit,
                        i,
                    ));
                }
                Some(_) => {} // same unit revisited; not a duplicate device
            }
        }
    }

    fn check_lf_predecessor(
        heat_id: &str,
        ops: &[ResolvedOp],
        errors: &mut Vec<ValidationError>,
    ) {
        let bof_end = ops
            .iter()
            .find(|op| op.group == StageGroup::Bof)
            .map(|op| op.end_time);

        for (i, op) in ops.iter().enumerate() {
            if op.group != StageGroup::Lf {
                continue;
            }
            match bof_end {
                None => {
                    errors.push(ValidationError::lf_without_bof(heat_id, &op.unit));
                    // One report per heat is enough for a missing stage.
                    return;
                }
                Some(end) if op.start_time < end => {
                    errors.push(ValidationError::lf_before_bof_end(heat_id, &op.unit, i));
                }
                Some(_) => {}
            }
        }
    }
}
