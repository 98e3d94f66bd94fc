// ==========================================
// Hệ thống mẻ thép - validation error model
// ==========================================
// Domain errors are data, never Err: the pipeline collects them all and
// classifies the whole input in a single pass.
// ==========================================

use crate::domain::types::ErrorKind;
use crate::i18n;
use serde::{Deserialize, Serialize};

// ==========================================
// ValidationError
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub heat_id: String,
    pub kind: ErrorKind,
    /// Human-readable, localized through the active locale.
    pub message: String,
    pub unit: Option<String>,
    /// Index into the heat's sorted operation list, for routing errors.
    pub op_index: Option<usize>,
    /// 1-based original sheet position, for row-level errors.
    pub raw_index: Option<usize>,
}

impl ValidationError {
    pub fn new(heat_id: impl Into<String>, kind: ErrorKind, message: String) -> Self {
        Self {
            heat_id: heat_id.into(),
            kind,
            message,
            unit: None,
            op_index: None,
            raw_index: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_op_index(mut self, op_index: usize) -> Self {
        self.op_index = Some(op_index);
        self
    }

    pub fn with_raw_index(mut self, raw_index: usize) -> Self {
        self.raw_index = Some(raw_index);
        self
    }

    // ==========================================
    // Localized constructors
    // ==========================================
    // One constructor per trigger keeps message keys next to their
    // classification and out of the pipeline control flow.

    pub fn placeholder_row(heat_id: &str, raw_index: usize) -> Self {
        let message = i18n::t_with_args(
            "validate.placeholder_row",
            &[("row", &raw_index.to_string())],
        );
        Self::new(heat_id, ErrorKind::Placeholder, message).with_raw_index(raw_index)
    }

    pub fn bad_time_format(heat_id: &str, field: &str, value: &str, raw_index: usize) -> Self {
        let message = i18n::t_with_args(
            "validate.bad_time_format",
            &[("field", field), ("value", value), ("row", &raw_index.to_string())],
        );
        Self::new(heat_id, ErrorKind::Format, message).with_raw_index(raw_index)
    }

    pub fn missing_field(heat_id: &str, field: &str, raw_index: usize) -> Self {
        let message = i18n::t_with_args(
            "validate.missing_field",
            &[("field", field), ("row", &raw_index.to_string())],
        );
        Self::new(heat_id, ErrorKind::Missing, message).with_raw_index(raw_index)
    }

    pub fn unknown_unit(heat_id: &str, unit: &str, raw_index: usize) -> Self {
        let message = i18n::t_with_args("validate.unknown_unit", &[("unit", unit)]);
        Self::new(heat_id, ErrorKind::Unit, message)
            .with_unit(unit)
            .with_raw_index(raw_index)
    }

    pub fn bad_base_date(heat_id: &str, value: &str, raw_index: usize) -> Self {
        let message = i18n::t_with_args("validate.bad_base_date", &[("value", value)]);
        Self::new(heat_id, ErrorKind::Format, message).with_raw_index(raw_index)
    }

    pub fn bad_time_value(heat_id: &str, unit: &str, value: &str, raw_index: usize) -> Self {
        let message = i18n::t_with_args(
            "validate.bad_time_value",
            &[("unit", unit), ("value", value)],
        );
        Self::new(heat_id, ErrorKind::Format, message)
            .with_unit(unit)
            .with_raw_index(raw_index)
    }

    pub fn end_not_after_start(heat_id: &str, unit: &str, raw_index: usize) -> Self {
        let message = i18n::t_with_args("validate.end_not_after_start", &[("unit", unit)]);
        Self::new(heat_id, ErrorKind::Time, message)
            .with_unit(unit)
            .with_raw_index(raw_index)
    }

    pub fn overlapping_operations(
        heat_id: &str,
        prev_unit: &str,
        unit: &str,
        op_index: usize,
    ) -> Self {
        let message = i18n::t_with_args(
            "validate.overlapping_operations",
            &[("prev_unit", prev_unit), ("unit", unit)],
        );
        Self::new(heat_id, ErrorKind::Time, message)
            .with_unit(unit)
            .with_op_index(op_index)
    }

    pub fn duplicate_group(
        heat_id: &str,
        group: &str,
        first_unit: &str,
        second_unit: &str,
        op_index: usize,
    ) -> Self {
        let message = i18n::t_with_args(
            "validate.duplicate_group",
            &[("group", group), ("first", first_unit), ("second", second_unit)],
        );
        Self::new(heat_id, ErrorKind::Routing, message)
            .with_unit(second_unit)
            .with_op_index(op_index)
    }

    pub fn lf_without_bof(heat_id: &str, unit: &str) -> Self {
        let message = i18n::t_with_args("validate.lf_without_bof", &[("unit", unit)]);
        Self::new(heat_id, ErrorKind::Routing, message).with_unit(unit)
    }

    pub fn lf_before_bof_end(heat_id: &str, unit: &str, op_index: usize) -> Self {
        let message = i18n::t_with_args("validate.lf_before_bof_end", &[("unit", unit)]);
        Self::new(heat_id, ErrorKind::Routing, message)
            .with_unit(unit)
            .with_op_index(op_index)
    }
}
