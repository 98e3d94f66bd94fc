// ==========================================
// Hệ thống mẻ thép - static unit table
// ==========================================
// Device code → stage group + canonical processing order. The table is
// plain immutable data; routing and sequencing never mutate it.
// ==========================================

use crate::domain::types::StageGroup;

// ==========================================
// UnitInfo
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitInfo {
    pub code: &'static str,
    pub group: StageGroup,
    /// Canonical stage order along the route KR(1) → BOF(2) → LF(3) → CASTER(4).
    pub canonical_order: i64,
}

/// Every named device in the melt shop, by stage group.
pub const UNIT_TABLE: &[UnitInfo] = &[
    // KR - hot metal pre-treatment
    UnitInfo { code: "KR1", group: StageGroup::Kr, canonical_order: 1 },
    UnitInfo { code: "KR2", group: StageGroup::Kr, canonical_order: 1 },
    // BOF - basic oxygen furnaces
    UnitInfo { code: "BOF1", group: StageGroup::Bof, canonical_order: 2 },
    UnitInfo { code: "BOF2", group: StageGroup::Bof, canonical_order: 2 },
    UnitInfo { code: "BOF3", group: StageGroup::Bof, canonical_order: 2 },
    // LF - ladle furnace stations
    UnitInfo { code: "LF1", group: StageGroup::Lf, canonical_order: 3 },
    UnitInfo { code: "LF2", group: StageGroup::Lf, canonical_order: 3 },
    UnitInfo { code: "LF3", group: StageGroup::Lf, canonical_order: 3 },
    // CASTER - continuous casters
    UnitInfo { code: "TSC1", group: StageGroup::Caster, canonical_order: 4 },
    UnitInfo { code: "TSC2", group: StageGroup::Caster, canonical_order: 4 },
    UnitInfo { code: "CC1", group: StageGroup::Caster, canonical_order: 4 },
];

/// Look up a device code (already trimmed and upper-cased by the row
/// parser). Unknown codes return `None` and are reported as advisory
/// UNIT warnings downstream.
pub fn lookup_unit(code: &str) -> Option<&'static UnitInfo> {
    UNIT_TABLE.iter().find(|info| info.code == code)
}
