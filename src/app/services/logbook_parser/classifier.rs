//! Table classification for logbook documents
//!
//! Assigns each raw table one category from a closed set, based on its
//! normalized first cell, its column count and a scan for species header
//! tokens. Classification is a pure function of the table content: the same
//! table always receives the same category wherever it appears in the stream.

use crate::app::models::{RawTable, TableCategory};
use crate::constants::{
    GENERAL_INFO_TOKENS, HAUL_DETAIL_TOKENS, OBSERVATIONS_MARKER, OBSERVATIONS_TABLE_MAX_ROWS,
    QUANTITY_TOKENS, SPECIES_HEADER_SCAN_ROWS, SPECIES_LABEL, SPECIES_TABLE_COLUMNS,
    SUMMARY_MARKER, WIDE_HAUL_TABLE_MIN_COLUMNS, haul_labels,
};

use super::field_parsers::{is_bare_integer, normalize_label, normalized_row_text, row_cell};

/// Classify a raw table, evaluating rules in fixed priority order
pub fn classify_table(table: &RawTable) -> TableCategory {
    if table.is_empty() {
        return TableCategory::Unknown;
    }

    let first_cell = normalize_label(table.first_cell());
    let columns = table.column_count();

    if contains_all(&first_cell, GENERAL_INFO_TOKENS) {
        return TableCategory::GeneralInfo;
    }

    if first_cell.contains(SUMMARY_MARKER) {
        return TableCategory::SummaryHeader;
    }

    if contains_all(&first_cell, HAUL_DETAIL_TOKENS) {
        return TableCategory::HaulHeader;
    }

    if columns >= WIDE_HAUL_TABLE_MIN_COLUMNS && is_haul_row_label(&first_cell) {
        return TableCategory::HaulContinuation;
    }

    if first_cell == OBSERVATIONS_MARKER && table.row_count() <= OBSERVATIONS_TABLE_MAX_ROWS {
        return TableCategory::ObservationsOnly;
    }

    if columns <= SPECIES_TABLE_COLUMNS && has_species_header(table, &first_cell) {
        return TableCategory::SpeciesStandalone;
    }

    if columns == SPECIES_TABLE_COLUMNS && has_indexed_row(table) {
        return TableCategory::SpeciesContinuationData;
    }

    TableCategory::Unknown
}

/// True when a normalized first cell labels one of the haul-detail rows
pub fn is_haul_row_label(label: &str) -> bool {
    label == haul_labels::START
        || label.contains(haul_labels::LATITUDE)
        || label.contains(haul_labels::LONGITUDE)
        || is_haul_number_label(label)
}

/// True when a normalized cell is the `LANCE #` label
pub fn is_haul_number_label(label: &str) -> bool {
    label.contains(haul_labels::HAUL) && label.contains(haul_labels::NUMBER_SIGN)
}

fn contains_all(text: &str, tokens: &[&str]) -> bool {
    tokens.iter().all(|token| text.contains(token))
}

fn has_species_header(table: &RawTable, first_cell: &str) -> bool {
    if first_cell.starts_with(SPECIES_LABEL) {
        return true;
    }

    table
        .rows
        .iter()
        .take(SPECIES_HEADER_SCAN_ROWS)
        .map(|row| normalized_row_text(row))
        .any(|text| {
            text.contains(SPECIES_LABEL) && QUANTITY_TOKENS.iter().any(|token| text.contains(token))
        })
}

fn has_indexed_row(table: &RawTable) -> bool {
    table.rows.iter().any(|row| is_bare_integer(row_cell(row, 0)))
}
