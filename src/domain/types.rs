// ==========================================
// Hệ thống mẻ thép - domain type definitions
// ==========================================
// Stage groups, error taxonomy, pipeline options
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Stage group
// ==========================================
// Every physical unit belongs to exactly one group; the group drives
// routing rules and the canonical processing order KR → BOF → LF → CASTER.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StageGroup {
    Kr,      // hot metal pre-treatment
    Bof,     // basic oxygen furnace
    Lf,      // ladle furnace
    Caster,  // continuous caster
    Unknown, // code not found in the unit table
}

impl fmt::Display for StageGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageGroup::Kr => write!(f, "KR"),
            StageGroup::Bof => write!(f, "BOF"),
            StageGroup::Lf => write!(f, "LF"),
            StageGroup::Caster => write!(f, "CASTER"),
            StageGroup::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ==========================================
// Error kind
// ==========================================
// UNIT and PLACEHOLDER are advisory; every other kind removes the owning
// heat from the valid output set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ErrorKind {
    Format,      // unparseable time/date string
    Routing,     // stage order or duplicate-group violation
    Time,        // end <= start, or overlapping operations
    Unit,        // unit code not in the static table
    Missing,     // required field absent on an otherwise well-formed row
    Placeholder, // row recognized as a non-operation placeholder
}

impl ErrorKind {
    /// A fatal kind drops the owning heat entirely; advisory kinds are
    /// informational and never block a heat on their own.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ErrorKind::Unit | ErrorKind::Placeholder)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Format => write!(f, "FORMAT"),
            ErrorKind::Routing => write!(f, "ROUTING"),
            ErrorKind::Time => write!(f, "TIME"),
            ErrorKind::Unit => write!(f, "UNIT"),
            ErrorKind::Missing => write!(f, "MISSING"),
            ErrorKind::Placeholder => write!(f, "PLACEHOLDER"),
        }
    }
}

// ==========================================
// Overlap policy
// ==========================================
// Two generations of the consistency validator disagreed on overlapping
// operations: the stricter one rejects the heat, the older one rendered
// the overlap as-is on the timeline. Kept as a flag, Reject by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OverlapPolicy {
    #[default]
    Reject,
    Tolerate,
}

// ==========================================
// Parse options
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub overlap_policy: OverlapPolicy,
    /// Base calendar date for heats that carry no date column at all.
    /// `None` falls back to today (plant-local); tests and replays pin it
    /// for reproducible output.
    pub fallback_date: Option<chrono::NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_kinds() {
        assert!(ErrorKind::Format.is_fatal());
        assert!(ErrorKind::Routing.is_fatal());
        assert!(ErrorKind::Time.is_fatal());
        assert!(ErrorKind::Missing.is_fatal());
        assert!(!ErrorKind::Unit.is_fatal());
        assert!(!ErrorKind::Placeholder.is_fatal());
    }

    #[test]
    fn test_stage_group_display() {
        assert_eq!(StageGroup::Bof.to_string(), "BOF");
        assert_eq!(StageGroup::Caster.to_string(), "CASTER");
    }

    #[test]
    fn test_default_overlap_policy() {
        assert_eq!(OverlapPolicy::default(), OverlapPolicy::Reject);
    }
}
