//! Field parsing utilities for logbook table cells
//!
//! This module provides helper functions for reading cells, normalizing labels
//! for marker comparison, and parsing quantities and timestamps. Every parser
//! returns `Option`: a cell that fails to parse leaves its field absent.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::app::models::Cell;
use crate::constants::{DATE_FORMATS, DATETIME_FORMATS, EMPTY_OBSERVATION_VALUES};

static DATE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}[-/]\d{2}[-/]\d{4}").expect("valid date prefix pattern"));

/// Trimmed text of a cell, empty for merged cells
pub fn cell_text(cell: &Cell) -> &str {
    cell.as_deref().map(str::trim).unwrap_or("")
}

/// Trimmed text of the cell at `index`, empty when the row is shorter
pub fn row_cell(row: &[Cell], index: usize) -> &str {
    row.get(index).map(cell_text).unwrap_or("")
}

/// Normalize a label for marker comparison
///
/// Decomposes to NFD, drops combining marks (so `INFORMACIÓN` matches
/// `INFORMACION`), upper-cases and collapses internal whitespace.
pub fn normalize_label(text: &str) -> String {
    let folded: String = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_uppercase();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized text of the first cell of a row
pub fn normalized_first_cell(row: &[Cell]) -> String {
    normalize_label(row_cell(row, 0))
}

/// Normalized text of all non-empty cells of a row, space separated
pub fn normalized_row_text(row: &[Cell]) -> String {
    let joined = row
        .iter()
        .map(cell_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    normalize_label(&joined)
}

/// True for a non-empty run of ASCII digits
pub fn is_bare_integer(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a weight cell in tons
pub fn parse_tons(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse an individual-count cell; decimals are truncated
pub fn parse_count(text: &str) -> Option<u64> {
    let value = parse_tons(text)?;
    if value < 0.0 {
        return None;
    }
    Some(value.trunc() as u64)
}

/// True when the cell starts with a `dd-mm-YYYY` or `dd/mm/YYYY` date
pub fn looks_like_date(text: &str) -> bool {
    DATE_PREFIX.is_match(text.trim())
}

/// Parse a logbook timestamp; date-only values resolve to midnight
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Observation text of a cell, or `None` for blanks and placeholder values
pub fn observation_text(cell: &Cell) -> Option<&str> {
    let text = cell_text(cell);
    if text.is_empty() {
        return None;
    }
    let normalized = normalize_label(text);
    if EMPTY_OBSERVATION_VALUES.contains(&normalized.as_str()) {
        return None;
    }
    Some(text)
}
