// ==========================================
// Hệ thống mẻ thép - heat grouper
// ==========================================
// Groups canonical rows by heat id and orders each group for parsing.
// The parse order only seeds the overnight-rollover heuristic; the
// authoritative order is the resolved start time, recomputed later.
// ==========================================

use crate::domain::heat::RawRow;
use std::cmp::Ordering;
use std::collections::HashMap;

// ==========================================
// HeatGroup
// ==========================================
#[derive(Debug, Clone)]
pub struct HeatGroup {
    pub heat_id: String,
    /// Rows in parse order (see `parse_order`).
    pub rows: Vec<RawRow>,
}

pub struct HeatGrouper;

impl HeatGrouper {
    /// Group rows by heat id. Grouping is stable: groups appear in order
    /// of each heat's first row, and rows keep their original order
    /// within a group until sorted.
    pub fn group(rows: Vec<RawRow>) -> Vec<HeatGroup> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<HeatGroup> = Vec::new();

        for row in rows {
            match index.get(&row.heat_id) {
                Some(&i) => groups[i].rows.push(row),
                None => {
                    index.insert(row.heat_id.clone(), groups.len());
                    groups.push(HeatGroup {
                        heat_id: row.heat_id.clone(),
                        rows: vec![row],
                    });
                }
            }
        }

        for group in &mut groups {
            group.rows.sort_by(Self::parse_order);
        }
        groups
    }

    /// Parse-order comparator: explicit sequence number when both rows
    /// carry one, else lexical start-time comparison (valid because the
    /// row parser canonicalizes to fixed-width `HH:MM`), with the
    /// original sheet position as the final tie-break.
    fn parse_order(a: &RawRow, b: &RawRow) -> Ordering {
        let primary = match (a.seq_num, b.seq_num) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => a.start_str.cmp(&b.start_str),
        };
        primary.then(a.raw_index.cmp(&b.raw_index))
    }
}
