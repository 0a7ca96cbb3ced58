//! Species row parsing
//!
//! Converts one species data row into catch entries. A single row can report
//! the same species under several dispositions, so it yields between zero and
//! four entries, one per populated quantity column.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::app::models::{CatchEntry, Cell, Disposition, Quantity};
use crate::app::services::species_registry::SpeciesRegistry;
use crate::constants::NON_DATA_NAME_MARKERS;

use super::column_mapping::ColumnMap;
use super::field_parsers::{is_bare_integer, normalize_label, parse_count, parse_tons, row_cell};

static COMPOUND_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*;\s*").expect("valid compound separator pattern"));

/// Which quantity a column holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuantityKind {
    Tons,
    Count,
}

/// Rewrite `;`-joined compound species names as `A / B`
pub fn clean_species_name(name: &str) -> String {
    if name.contains(';') {
        COMPOUND_SEPARATOR.replace_all(name, " / ").into_owned()
    } else {
        name.to_string()
    }
}

/// Parse one data row into catch entries
///
/// Rows whose index cell is not a bare integer, whose name is missing, or whose
/// name is really a header label are rejected with no entries. The category is
/// looked up with the name as written in the document.
pub fn parse_species_row(
    row: &[Cell],
    columns: &ColumnMap,
    registry: &dyn SpeciesRegistry,
    min_tons: f64,
) -> Vec<CatchEntry> {
    let index = row_cell(row, columns.index);
    let raw_name = row_cell(row, columns.name);

    if !is_bare_integer(index) || raw_name.is_empty() {
        return Vec::new();
    }

    let normalized = normalize_label(raw_name);
    if NON_DATA_NAME_MARKERS
        .iter()
        .any(|marker| normalized.contains(marker))
    {
        return Vec::new();
    }

    let species = clean_species_name(raw_name);
    let category = registry.lookup(raw_name).category;

    let quantity_columns = [
        (columns.retained_tons, QuantityKind::Tons, Disposition::Retained),
        (columns.discarded_tons, QuantityKind::Tons, Disposition::Discarded),
        (columns.discarded_count, QuantityKind::Count, Disposition::Discarded),
        (columns.incidental_count, QuantityKind::Count, Disposition::Incidental),
    ];

    quantity_columns
        .into_iter()
        .filter_map(|(column, kind, disposition)| {
            let text = row_cell(row, column?);
            let quantity = parse_quantity(text, kind, min_tons, &species)?;
            Some(CatchEntry {
                species: species.clone(),
                quantity,
                disposition,
                category,
            })
        })
        .collect()
}

fn parse_quantity(
    text: &str,
    kind: QuantityKind,
    min_tons: f64,
    species: &str,
) -> Option<Quantity> {
    if text.is_empty() {
        return None;
    }

    let quantity = match kind {
        QuantityKind::Tons => parse_tons(text)
            .filter(|tons| *tons > 0.0 && *tons >= min_tons)
            .map(Quantity::Tons),
        QuantityKind::Count => parse_count(text)
            .filter(|units| *units > 0)
            .map(Quantity::Units),
    };

    if quantity.is_none() && parse_tons(text).is_none() {
        debug!("Unparseable quantity '{}' for species '{}'", text, species);
    }

    quantity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{RawTable, SpeciesCategory};
    use crate::app::services::species_registry::StaticSpeciesRegistry;
    use crate::constants::MIN_REPORTABLE_TONS;

    fn row(cells: &[&str]) -> Vec<Cell> {
        RawTable::from_strs(&[cells]).rows.remove(0)
    }

    fn parse(cells: &[&str]) -> Vec<CatchEntry> {
        let registry = StaticSpeciesRegistry::builtin();
        parse_species_row(
            &row(cells),
            &ColumnMap::positional(),
            &registry,
            MIN_REPORTABLE_TONS,
        )
    }

    #[test]
    fn test_retained_and_discarded_tons_yield_two_entries() {
        let entries = parse(&["1", "Species A", "2.500", "0.100", "0", "0"]);
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].species, "Species A");
        assert_eq!(entries[0].quantity, Quantity::Tons(2.5));
        assert_eq!(entries[0].disposition, Disposition::Retained);

        assert_eq!(entries[1].quantity, Quantity::Tons(0.1));
        assert_eq!(entries[1].disposition, Disposition::Discarded);
        assert_eq!(entries[1].category, SpeciesCategory::Bycatch);
    }

    #[test]
    fn test_all_four_columns_populated() {
        let entries = parse(&["3", "Merluza común", "0.150", "0.020", "12", "4.7"]);
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[2].quantity, Quantity::Units(12));
        assert_eq!(entries[2].disposition, Disposition::Discarded);
        assert_eq!(entries[3].quantity, Quantity::Units(4));
        assert_eq!(entries[3].disposition, Disposition::Incidental);
        assert!(entries
            .iter()
            .all(|entry| entry.category == SpeciesCategory::IncidentalPredator));
    }

    #[test]
    fn test_below_threshold_quantities_are_dropped() {
        assert!(parse(&["1", "Camarón nailon", "0.0009", "", "", ""]).is_empty());
        assert_eq!(parse(&["1", "Camarón nailon", "0.001", "", "", ""]).len(), 1);
        assert!(parse(&["1", "Jaiba paco", "", "", "0.4", "-2"]).is_empty());
    }

    #[test]
    fn test_rejects_non_data_rows() {
        assert!(parse(&["", "Camarón nailon", "1.0", "", "", ""]).is_empty());
        assert!(parse(&["1.", "Camarón nailon", "1.0", "", "", ""]).is_empty());
        assert!(parse(&["1", "", "1.0", "", "", ""]).is_empty());
        assert!(parse(&["1", "TIPO DE CAPTURA", "1.0", "", "", ""]).is_empty());
        assert!(parse(&["2", "Especie sin nombre", "1.0", "", "", ""]).is_empty());
    }

    #[test]
    fn test_compound_names_and_category_lookup() {
        let entries = parse(&["4", "Jaiba paco;Jaiba limón", "", "", "1000", ""]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].species, "Jaiba paco / Jaiba limón");
        assert_eq!(entries[0].quantity, Quantity::Units(1000));

        assert_eq!(clean_species_name("A ;  B; C"), "A / B / C");
        assert_eq!(clean_species_name("Congrio negro"), "Congrio negro");
    }

    #[test]
    fn test_unparseable_cells_are_skipped() {
        let entries = parse(&["5", "Camarón nailon", "abc", "0.5", "x", ""]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].disposition, Disposition::Discarded);
        assert_eq!(entries[0].category, SpeciesCategory::Target);
    }

    #[test]
    fn test_short_rows_and_unset_columns() {
        assert_eq!(parse(&["1", "Camarón nailon", "1.2"]).len(), 1);

        let registry = StaticSpeciesRegistry::builtin();
        let retained_only = ColumnMap {
            discarded_tons: None,
            discarded_count: None,
            incidental_count: None,
            ..ColumnMap::positional()
        };
        let entries = parse_species_row(
            &row(&["1", "Camarón nailon", "1.2", "0.3", "7", "9"]),
            &retained_only,
            &registry,
            MIN_REPORTABLE_TONS,
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, SpeciesCategory::Target);
    }

    #[test]
    fn test_zero_weights_never_become_entries() {
        let registry = StaticSpeciesRegistry::builtin();
        let entries = parse_species_row(
            &row(&["1", "Camarón nailon", "0.000", "0", "", ""]),
            &ColumnMap::positional(),
            &registry,
            0.0,
        );
        assert!(entries.is_empty());

        let entries = parse_species_row(
            &row(&["2", "Merluza común", "0.000", "0.040", "", "3"]),
            &ColumnMap::positional(),
            &registry,
            0.0,
        );
        assert_eq!(entries.len(), 2);
        for entry in &entries {
            let tons = entry.quantity_tons();
            let units = entry.quantity_units();
            assert!((tons > 0.0) != (units > 0), "{:?}", entry.quantity);
        }
    }

    #[test]
    fn test_huge_count_is_kept_as_units() {
        let entries = parse(&["1", "Jaiba paco", "", "", "1e19", ""]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].quantity, Quantity::Units(10_000_000_000_000_000_000));
    }
}
