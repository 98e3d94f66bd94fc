// ==========================================
// Hệ thống mẻ thép - header alias dictionary
// ==========================================
// Canonical field ← normalized header key. Keys are stored in their
// normalized form (lower-case, diacritics folded, whitespace and
// underscores stripped) so the dictionary never re-normalizes.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// CanonicalField
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanonicalField {
    HeatId,
    SteelGrade,
    Unit,
    StartStr,
    EndStr,
    DateStr,
    SeqNum,
}

impl CanonicalField {
    /// Fields a sheet must map before any row can be parsed.
    pub const REQUIRED: &'static [CanonicalField] = &[
        CanonicalField::HeatId,
        CanonicalField::SteelGrade,
        CanonicalField::Unit,
        CanonicalField::StartStr,
        CanonicalField::EndStr,
    ];
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalField::HeatId => write!(f, "heatId"),
            CanonicalField::SteelGrade => write!(f, "steelGrade"),
            CanonicalField::Unit => write!(f, "unit"),
            CanonicalField::StartStr => write!(f, "startStr"),
            CanonicalField::EndStr => write!(f, "endStr"),
            CanonicalField::DateStr => write!(f, "dateStr"),
            CanonicalField::SeqNum => write!(f, "seqNum"),
        }
    }
}

// ==========================================
// Alias dictionary
// ==========================================
// English and Vietnamese spellings observed in plant reports. The
// Vietnamese entries are the normalized forms of, e.g., "mẻ thép",
// "mác thép", "công đoạn", "thời gian bắt đầu", "số thứ tự".
pub const HEADER_ALIASES: &[(&str, CanonicalField)] = &[
    // heat identifier
    ("heatid", CanonicalField::HeatId),
    ("heatno", CanonicalField::HeatId),
    ("methep", CanonicalField::HeatId), // mẻ thép
    ("some", CanonicalField::HeatId),   // số mẻ
    ("me", CanonicalField::HeatId),     // mẻ
    // steel grade
    ("steelgrade", CanonicalField::SteelGrade),
    ("grade", CanonicalField::SteelGrade),
    ("macthep", CanonicalField::SteelGrade), // mác thép
    ("mac", CanonicalField::SteelGrade),     // mác
    // unit / station
    ("unit", CanonicalField::Unit),
    ("station", CanonicalField::Unit),
    ("congdoan", CanonicalField::Unit), // công đoạn
    ("thietbi", CanonicalField::Unit),  // thiết bị
    // start time
    ("starttime", CanonicalField::StartStr),
    ("start", CanonicalField::StartStr),
    ("batdau", CanonicalField::StartStr),         // bắt đầu
    ("thoigianbatdau", CanonicalField::StartStr), // thời gian bắt đầu
    ("giobatdau", CanonicalField::StartStr),      // giờ bắt đầu
    // end time
    ("endtime", CanonicalField::EndStr),
    ("end", CanonicalField::EndStr),
    ("ketthuc", CanonicalField::EndStr),         // kết thúc
    ("thoigianketthuc", CanonicalField::EndStr), // thời gian kết thúc
    ("gioketthuc", CanonicalField::EndStr),      // giờ kết thúc
    // production date
    ("date", CanonicalField::DateStr),
    ("ngay", CanonicalField::DateStr),         // ngày
    ("ngaysanxuat", CanonicalField::DateStr),  // ngày sản xuất
    // explicit sequence number
    ("sequencenumber", CanonicalField::SeqNum),
    ("seq", CanonicalField::SeqNum),
    ("sothutu", CanonicalField::SeqNum), // số thứ tự
    ("stt", CanonicalField::SeqNum),
];

/// Resolve a normalized header key against the dictionary. Unrecognized
/// keys return `None`; their column is dropped, not an error.
pub fn lookup_header(normalized: &str) -> Option<CanonicalField> {
    HEADER_ALIASES
        .iter()
        .find(|(key, _)| *key == normalized)
        .map(|(_, field)| *field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_english_aliases() {
        assert_eq!(lookup_header("heatid"), Some(CanonicalField::HeatId));
        assert_eq!(lookup_header("steelgrade"), Some(CanonicalField::SteelGrade));
        assert_eq!(lookup_header("starttime"), Some(CanonicalField::StartStr));
        assert_eq!(lookup_header("stt"), Some(CanonicalField::SeqNum));
    }

    #[test]
    fn test_lookup_vietnamese_aliases() {
        assert_eq!(lookup_header("methep"), Some(CanonicalField::HeatId));
        assert_eq!(lookup_header("congdoan"), Some(CanonicalField::Unit));
        assert_eq!(lookup_header("thoigianketthuc"), Some(CanonicalField::EndStr));
    }

    #[test]
    fn test_lookup_unknown_returns_none() {
        assert_eq!(lookup_header("operator"), None);
        assert_eq!(lookup_header(""), None);
    }
}
