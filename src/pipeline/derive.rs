// ==========================================
// Hệ thống mẻ thép - derived-field calculator
// ==========================================
// Per-heat durations, idle times and caster attributes, plus the
// cross-heat caster sequence numbering. The sequencing step is a pure
// function over the already-validated heat list: it is the one global
// reduction in an otherwise per-heat pipeline.
// ==========================================

use crate::domain::heat::{Heat, Operation};
use crate::domain::types::StageGroup;
use crate::pipeline::temporal::ResolvedOp;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

/// A production day runs 08:00 local to 07:59:59 the next calendar day,
/// so a timestamp's production day is the date eight hours earlier.
pub fn production_day(t: NaiveDateTime) -> NaiveDate {
    (t - Duration::hours(8)).date()
}

// Minutes between two timestamps, rounded from seconds.
fn minutes_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    let seconds = (to - from).num_seconds();
    (seconds as f64 / 60.0).round() as i64
}

pub struct DerivedFieldCalculator;

impl DerivedFieldCalculator {
    /// Assemble a validated heat from its sorted operations.
    ///
    /// - `idle_time_minutes[0] = 0`; afterwards the gap to the previous
    ///   operation's end.
    /// - `casting_machine` is the unit of the CASTER operation with the
    ///   greatest start time. A heat should visit at most one caster, but
    ///   "last" keeps the answer well-defined either way.
    /// - `sequence_in_caster` stays unset here; `assign_caster_sequence`
    ///   fills it once every heat has been validated.
    pub fn finalize(heat_id: String, steel_grade: String, ops: Vec<ResolvedOp>) -> Heat {
        let mut operations = Vec::with_capacity(ops.len());
        let mut previous_end: Option<NaiveDateTime> = None;

        for op in ops {
            let idle_time_minutes = match previous_end {
                Some(end) => minutes_between(end, op.start_time),
                None => 0,
            };
            previous_end = Some(op.end_time);
            operations.push(Operation {
                duration_minutes: minutes_between(op.start_time, op.end_time),
                idle_time_minutes,
                unit: op.unit,
                group: op.group,
                sequence_order: op.sequence_order,
                start_time: op.start_time,
                end_time: op.end_time,
            });
        }

        let casting_machine = Self::last_caster(&operations).map(|op| op.unit.clone());
        let is_complete = casting_machine.is_some();
        let total_duration_minutes = operations.iter().map(|op| op.duration_minutes).sum();
        let total_idle_minutes = operations.iter().map(|op| op.idle_time_minutes).sum();

        Heat {
            heat_id,
            steel_grade,
            operations,
            casting_machine,
            sequence_in_caster: None,
            is_complete,
            total_duration_minutes,
            total_idle_minutes,
        }
    }

    fn last_caster(operations: &[Operation]) -> Option<&Operation> {
        operations
            .iter()
            .filter(|op| op.group == StageGroup::Caster)
            .max_by_key(|op| op.start_time)
    }
}

/// Assign per-caster sequence numbers across the full valid-heat set.
///
/// Heats are grouped by `(casting_machine, production day of the caster
/// start)` and ranked 1..N by caster start time within each group. The
/// sort is stable, so heats tied on caster start keep their validated
/// order. Heats that never reach a caster keep `sequence_in_caster =
/// None` and belong to no group.
pub fn assign_caster_sequence(mut heats: Vec<Heat>) -> Vec<Heat> {
    let mut cohorts: BTreeMap<(String, NaiveDate), Vec<usize>> = BTreeMap::new();

    for (i, heat) in heats.iter().enumerate() {
        let Some(machine) = heat.casting_machine.clone() else {
            continue;
        };
        let Some(caster_start) = heat
            .operations
            .iter()
            .filter(|op| op.group == StageGroup::Caster)
            .map(|op| op.start_time)
            .max()
        else {
            continue;
        };
        cohorts
            .entry((machine, production_day(caster_start)))
            .or_default()
            .push(i);
    }

    for members in cohorts.values_mut() {
        members.sort_by_key(|&i| {
            heats[i]
                .operations
                .iter()
                .filter(|op| op.group == StageGroup::Caster)
                .map(|op| op.start_time)
                .max()
        });
        for (rank, &i) in members.iter().enumerate() {
            heats[i].sequence_in_caster = Some(rank as u32 + 1);
        }
    }

    heats
}
