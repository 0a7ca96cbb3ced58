//! Column offset resolution for species tables
//!
//! Species quantities appear in the 6-column summary layout and in the wider
//! 8/9-column haul layout. Both are resolved here from their header row; tables
//! that continue onto a new page without a header fall back to the positional
//! layout.

use crate::app::models::{Cell, RawTable};
use crate::constants::{
    DISCARDED_TOKEN, INCIDENTAL_TOKEN, RETAINED_TOKEN, TONS_TOKEN, positional_layout,
};

use super::field_parsers::{cell_text, normalize_label, normalized_row_text};

/// Resolved column offsets of a species table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub index: usize,
    pub name: usize,
    pub retained_tons: Option<usize>,
    pub discarded_tons: Option<usize>,
    pub discarded_count: Option<usize>,
    pub incidental_count: Option<usize>,
}

impl ColumnMap {
    /// Layout of headerless continuation tables
    pub fn positional() -> Self {
        Self {
            index: positional_layout::INDEX,
            name: positional_layout::NAME,
            retained_tons: Some(positional_layout::RETAINED_TONS),
            discarded_tons: Some(positional_layout::DISCARDED_TONS),
            discarded_count: Some(positional_layout::DISCARDED_COUNT),
            incidental_count: Some(positional_layout::INCIDENTAL_COUNT),
        }
    }

    /// True when at least one quantity column was resolved
    pub fn has_quantities(&self) -> bool {
        self.retained_tons.is_some()
            || self.discarded_tons.is_some()
            || self.discarded_count.is_some()
            || self.incidental_count.is_some()
    }
}

/// Resolve quantity columns from a species header row
///
/// The index and name columns are fixed at 0 and 1 in every layout. The first
/// cell matching each quantity kind wins.
pub fn resolve_columns(header_row: &[Cell]) -> ColumnMap {
    let mut map = ColumnMap {
        index: positional_layout::INDEX,
        name: positional_layout::NAME,
        retained_tons: None,
        discarded_tons: None,
        discarded_count: None,
        incidental_count: None,
    };

    for (column, cell) in header_row.iter().enumerate() {
        let label = normalize_label(cell_text(cell));
        if label.is_empty() {
            continue;
        }

        let is_tons = label.contains(TONS_TOKEN);
        let slot = if label.contains(RETAINED_TOKEN) && is_tons {
            &mut map.retained_tons
        } else if label.contains(DISCARDED_TOKEN) && is_tons {
            &mut map.discarded_tons
        } else if label.contains(DISCARDED_TOKEN) {
            &mut map.discarded_count
        } else if label.contains(INCIDENTAL_TOKEN) {
            &mut map.incidental_count
        } else {
            continue;
        };

        if slot.is_none() {
            *slot = Some(column);
        }
    }

    map
}

/// True when a row is a species quantity header (names Retenida together with TON)
pub fn is_species_header_row(row: &[Cell]) -> bool {
    let text = normalized_row_text(row);
    text.contains(RETAINED_TOKEN) && text.contains(TONS_TOKEN)
}

/// Locate the species header row of a table and resolve its columns
pub fn find_species_header(table: &RawTable) -> Option<(usize, ColumnMap)> {
    table
        .rows
        .iter()
        .position(|row| is_species_header_row(row))
        .map(|row_index| (row_index, resolve_columns(&table.rows[row_index])))
}
