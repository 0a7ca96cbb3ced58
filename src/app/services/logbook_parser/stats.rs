//! Parsing diagnostics and result structures for logbook processing
//!
//! Structural surprises never abort a parse. They are collected here so the
//! caller can judge how much of a document was understood.

use crate::app::models::{TableCategory, TripRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Parsing result with the trip record and the diagnostics gathered on the way
///
/// Serializes as the record's own fields plus a `diagnostics` object, so the
/// output still reads as a `TripRecord`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Structured trip record
    #[serde(flatten)]
    pub record: TripRecord,

    /// Non-fatal findings from classification and extraction
    pub diagnostics: ParseDiagnostics,
}

/// A single non-fatal finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A table matched no known layout and was ignored
    UnknownTable { page: usize, first_cell: String },

    /// A species or observations table appeared before any haul
    OrphanTable { page: usize, category: TableCategory },

    /// A haul header repeated the number of the haul in progress
    DuplicateHaulMerged { page: usize, haul: u32 },

    /// A cell that should hold a date or coordinate could not be parsed
    FieldRecoveryFailure {
        page: usize,
        haul: u32,
        field: String,
        value: String,
    },

    /// No trip identifier was found; a temporary one was generated
    IdentifierSynthesized { trip_id: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownTable { page, first_cell } => {
                write!(f, "page {}: unrecognized table starting '{}'", page + 1, first_cell)
            }
            Diagnostic::OrphanTable { page, category } => {
                write!(f, "page {}: {} table with no haul in progress", page + 1, category)
            }
            Diagnostic::DuplicateHaulMerged { page, haul } => {
                write!(f, "page {}: repeated header for haul {} merged", page + 1, haul)
            }
            Diagnostic::FieldRecoveryFailure {
                page,
                haul,
                field,
                value,
            } => write!(
                f,
                "page {}: haul {} {} '{}' could not be parsed",
                page + 1,
                haul,
                field,
                value
            ),
            Diagnostic::IdentifierSynthesized { trip_id } => {
                write!(f, "trip identifier not found, using {}", trip_id)
            }
        }
    }
}

/// Diagnostics for one parsed document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseDiagnostics {
    /// Total number of tables in the stream
    pub tables_total: usize,

    /// Number of tables per category
    pub category_counts: BTreeMap<TableCategory, usize>,

    /// Findings in the order they were encountered
    pub entries: Vec<Diagnostic>,
}

impl ParseDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one classified table
    pub fn record_table(&mut self, category: TableCategory) {
        self.tables_total += 1;
        *self.category_counts.entry(category).or_insert(0) += 1;
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Number of tables classified as `category`
    pub fn count_of(&self, category: TableCategory) -> usize {
        self.category_counts.get(&category).copied().unwrap_or(0)
    }

    /// Share of tables that matched a known layout, as a percentage
    pub fn recognition_rate(&self) -> f64 {
        if self.tables_total == 0 {
            0.0
        } else {
            let recognized = self.tables_total - self.count_of(TableCategory::Unknown);
            (recognized as f64 / self.tables_total as f64) * 100.0
        }
    }

    /// Check if the trip identifier had to be synthesized
    pub fn identifier_synthesized(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| matches!(entry, Diagnostic::IdentifierSynthesized { .. }))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }
}
