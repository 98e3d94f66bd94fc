// ==========================================
// Hệ thống mẻ thép - static configuration
// ==========================================
// Embedded lookup tables: unit → group/order and header aliases. Not
// user-configurable at runtime.
// ==========================================

pub mod headers;
pub mod units;

pub use headers::{lookup_header, CanonicalField, HEADER_ALIASES};
pub use units::{lookup_unit, UnitInfo, UNIT_TABLE};
