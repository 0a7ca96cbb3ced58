//! Haul and species table extraction
//!
//! A haul is described by a mix of tables: the detail table (4-9 columns,
//! possibly cut at a page boundary), wide continuation tables, standalone
//! species tables and observation tables. This module reads each of them into
//! an in-progress [`Haul`]. The same row-level rules apply to every layout, so
//! a field is recovered the same way whichever table it lands in.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::app::models::{CatchEntry, Cell, Haul, RawTable};
use crate::app::services::coordinates::{convert_coordinate, looks_like_coordinate};
use crate::app::services::species_registry::SpeciesRegistry;
use crate::config::ExtractorConfig;
use crate::constants::{
    HAUL_NUMBER_SCAN_ROWS, NO_CATCH_MARKER, OBSERVATIONS_MARKER, haul_labels,
};

use super::classifier::is_haul_number_label;
use super::column_mapping::{ColumnMap, find_species_header};
use super::field_parsers::{
    is_bare_integer, looks_like_date, normalize_label, normalized_first_cell, observation_text,
    parse_timestamp, row_cell,
};
use super::species_rows::parse_species_row;
use super::stats::{Diagnostic, ParseDiagnostics};

static EMBEDDED_HAUL_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#\s*(\d+)").expect("valid haul number pattern"));

/// Columns searched for the start timestamp of an INICIO row
const START_TIME_COLUMNS: std::ops::RangeInclusive<usize> = 1..=3;

/// Cells searched for the end timestamp after a FIN label
const END_TIME_LOOKAHEAD: usize = 2;

/// Read-only inputs shared by every table extraction
#[derive(Debug, Clone, Copy)]
pub struct TableContext<'a> {
    pub registry: &'a dyn SpeciesRegistry,
    pub config: &'a ExtractorConfig,
}

/// How species columns are resolved when a table has no quantity header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeciesLayout {
    /// Without a Retenida/TON header row the table holds no species data
    HeaderRequired,
    /// Without a header row, read every row with the positional layout
    PositionalFallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Latitude,
    Longitude,
}

// =============================================================================
// Haul Number and Row Fields
// =============================================================================

/// Haul number named in the first rows of a table, if any
pub fn detect_haul_number(table: &RawTable) -> Option<u32> {
    table
        .rows
        .iter()
        .take(HAUL_NUMBER_SCAN_ROWS)
        .filter(|row| is_haul_number_label(&normalized_first_cell(row)))
        .find_map(|row| haul_number_from_row(row))
}

/// Number on a `LANCE #` row: the first integer cell after the label, or
/// digits written inside the label itself
fn haul_number_from_row(row: &[Cell]) -> Option<u32> {
    (1..row.len())
        .map(|column| row_cell(row, column))
        .find(|text| is_bare_integer(text))
        .and_then(|text| text.parse().ok())
        .or_else(|| {
            EMBEDDED_HAUL_NUMBER
                .captures(row_cell(row, 0))
                .and_then(|caps| caps.get(1))
                .and_then(|digits| digits.as_str().parse().ok())
        })
}

/// Gear named after an ARTE … PESCA label on a `LANCE #` row
fn gear_from_row(row: &[Cell]) -> Option<String> {
    let label_column = (0..row.len()).find(|&column| {
        let label = normalize_label(row_cell(row, column));
        haul_labels::GEAR_TOKENS
            .iter()
            .all(|token| label.contains(token))
    })?;

    ((label_column + 1)..row.len())
        .map(|column| row_cell(row, column))
        .find(|text| {
            !text.is_empty() && !is_bare_integer(text) && !text.eq_ignore_ascii_case("none")
        })
        .map(str::to_string)
}

/// Apply the labelled rows of a haul table (number, gear, times, positions)
fn apply_row_fields(
    haul: &mut Haul,
    row: &[Cell],
    page: usize,
    diagnostics: &mut ParseDiagnostics,
) {
    let label = normalized_first_cell(row);

    if is_haul_number_label(&label) {
        if let Some(number) = haul_number_from_row(row) {
            haul.number = number;
        }
        if let Some(gear) = gear_from_row(row) {
            haul.gear = gear;
        }
    } else if label == haul_labels::START {
        apply_times(haul, row, page, diagnostics);
    } else if label.contains(haul_labels::LATITUDE) {
        apply_coordinates(haul, row, Axis::Latitude, page, diagnostics);
    } else if label.contains(haul_labels::LONGITUDE) {
        apply_coordinates(haul, row, Axis::Longitude, page, diagnostics);
    }
}

fn apply_times(haul: &mut Haul, row: &[Cell], page: usize, diagnostics: &mut ParseDiagnostics) {
    let start_cell = START_TIME_COLUMNS
        .map(|column| row_cell(row, column))
        .find(|text| looks_like_date(text));

    if let Some(text) = start_cell {
        match parse_timestamp(text) {
            Some(timestamp) => haul.start_time = Some(timestamp),
            None => record_failure(diagnostics, page, haul.number, "start_time", text),
        }
    }

    let end_label = (1..row.len())
        .find(|&column| normalize_label(row_cell(row, column)) == haul_labels::END);

    if let Some(label_column) = end_label {
        let end_cell = ((label_column + 1)..=(label_column + END_TIME_LOOKAHEAD))
            .map(|column| row_cell(row, column))
            .find(|text| looks_like_date(text));

        if let Some(text) = end_cell {
            match parse_timestamp(text) {
                Some(timestamp) => haul.end_time = Some(timestamp),
                None => record_failure(diagnostics, page, haul.number, "end_time", text),
            }
        }
    }
}

/// Coordinates are taken in cell order: the first is the start position (kept
/// if already set), the second is the end position
fn apply_coordinates(
    haul: &mut Haul,
    row: &[Cell],
    axis: Axis,
    page: usize,
    diagnostics: &mut ParseDiagnostics,
) {
    let field = match axis {
        Axis::Latitude => "latitude",
        Axis::Longitude => "longitude",
    };

    let values: Vec<Option<f64>> = (1..row.len())
        .map(|column| row_cell(row, column))
        .filter(|text| looks_like_coordinate(text))
        .map(|text| {
            let value = convert_coordinate(text);
            if value.is_none() {
                record_failure(diagnostics, page, haul.number, field, text);
            }
            value
        })
        .collect();

    let (start, end) = match axis {
        Axis::Latitude => (
            &mut haul.start_position.latitude,
            &mut haul.end_position.latitude,
        ),
        Axis::Longitude => (
            &mut haul.start_position.longitude,
            &mut haul.end_position.longitude,
        ),
    };

    if let Some(Some(value)) = values.first() {
        if start.is_none() {
            *start = Some(*value);
        }
    }
    if let Some(Some(value)) = values.get(1) {
        *end = Some(*value);
    }
}

fn record_failure(
    diagnostics: &mut ParseDiagnostics,
    page: usize,
    haul: u32,
    field: &str,
    value: &str,
) {
    debug!("Haul {}: could not parse {} from '{}'", haul, field, value);
    diagnostics.push(Diagnostic::FieldRecoveryFailure {
        page,
        haul,
        field: field.to_string(),
        value: value.to_string(),
    });
}

// =============================================================================
// Species and Observations
// =============================================================================

/// Catch entries of a table, read from the row after its quantity header
///
/// Reading stops at an OBSERVACIONES row; rows declaring a haul without catch
/// are skipped.
pub fn extract_species(
    table: &RawTable,
    layout: SpeciesLayout,
    ctx: &TableContext<'_>,
) -> Vec<CatchEntry> {
    let (first_data_row, columns) = match find_species_header(table) {
        Some((header_row, columns)) => (header_row + 1, columns),
        None => match layout {
            SpeciesLayout::HeaderRequired => return Vec::new(),
            SpeciesLayout::PositionalFallback => (0, ColumnMap::positional()),
        },
    };

    let mut entries = Vec::new();
    for row in table.rows.iter().skip(first_data_row) {
        let label = normalized_first_cell(row);
        if label == OBSERVATIONS_MARKER {
            break;
        }
        if label.contains(NO_CATCH_MARKER) {
            continue;
        }
        entries.extend(parse_species_row(
            row,
            &columns,
            ctx.registry,
            ctx.config.min_reportable_tons,
        ));
    }
    entries
}

/// Observation lines following the OBSERVACIONES row of a table
pub fn observation_lines(table: &RawTable) -> Vec<&str> {
    table
        .rows
        .iter()
        .skip_while(|row| normalized_first_cell(row) != OBSERVATIONS_MARKER)
        .skip(1)
        .filter_map(|row| row.first().and_then(observation_text))
        .collect()
}

fn append_observations(haul: &mut Haul, table: &RawTable) {
    for line in observation_lines(table) {
        haul.append_observation(line);
    }
}

// =============================================================================
// Table Application
// =============================================================================

/// Open a new haul from a detail or continuation table
pub fn start_haul(
    table: &RawTable,
    page: usize,
    ctx: &TableContext<'_>,
    diagnostics: &mut ParseDiagnostics,
) -> Haul {
    let mut haul = Haul::new(
        detect_haul_number(table).unwrap_or(0),
        ctx.config.default_gear.as_str(),
    );
    apply_haul_table(&mut haul, table, page, ctx, diagnostics);
    haul
}

/// Merge a detail or continuation table into the haul in progress
pub fn apply_haul_table(
    haul: &mut Haul,
    table: &RawTable,
    page: usize,
    ctx: &TableContext<'_>,
    diagnostics: &mut ParseDiagnostics,
) {
    for row in &table.rows {
        apply_row_fields(haul, row, page, diagnostics);
    }
    let entries = extract_species(table, SpeciesLayout::HeaderRequired, ctx);
    haul.catches.extend(entries);
    append_observations(haul, table);
}

/// Merge a standalone or headerless species table into the haul in progress
pub fn apply_species_table(haul: &mut Haul, table: &RawTable, ctx: &TableContext<'_>) {
    let entries = extract_species(table, SpeciesLayout::PositionalFallback, ctx);
    haul.catches.extend(entries);
    append_observations(haul, table);
}

/// Merge an observations-only table into the haul in progress
pub fn apply_observations_table(haul: &mut Haul, table: &RawTable) {
    append_observations(haul, table);
}
