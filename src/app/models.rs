//! Data models for logbook extraction
//!
//! This module contains the input shapes handed over by the table-extraction
//! layer (pages of raw tables) and the structured output of the pipeline:
//! trip header, hauls with their catch entries, and the validation report.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign};

// =============================================================================
// Extraction Layer Input
// =============================================================================

/// A single table cell as produced by the extraction layer (merged cells are `None`)
pub type Cell = Option<String>;

/// A raw table: rows of optional text cells, in reading order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTable {
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Build a table from string literals, treating empty strings as merged cells
    pub fn from_strs(rows: &[&[&str]]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                        .collect()
                })
                .collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column count, taken from the first row
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|row| row.len()).unwrap_or(0)
    }

    /// Raw text of the first cell of the first row
    pub fn first_cell(&self) -> &str {
        self.rows
            .first()
            .and_then(|row| row.first())
            .and_then(|cell| cell.as_deref())
            .unwrap_or("")
    }
}

/// One page of an extracted document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Tables on the page, in document order
    #[serde(default)]
    pub tables: Vec<RawTable>,

    /// Full page text
    #[serde(default)]
    pub text: String,
}

impl Page {
    pub fn new(tables: Vec<RawTable>, text: impl Into<String>) -> Self {
        Self {
            tables,
            text: text.into(),
        }
    }
}

// =============================================================================
// Table Classification
// =============================================================================

/// Closed set of table categories recognized by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableCategory {
    GeneralInfo,
    SummaryHeader,
    HaulHeader,
    HaulContinuation,
    SpeciesStandalone,
    SpeciesContinuationData,
    ObservationsOnly,
    Unknown,
}

impl TableCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableCategory::GeneralInfo => "general_info",
            TableCategory::SummaryHeader => "summary_header",
            TableCategory::HaulHeader => "haul_header",
            TableCategory::HaulContinuation => "haul_continuation",
            TableCategory::SpeciesStandalone => "species_standalone",
            TableCategory::SpeciesContinuationData => "species_continuation_data",
            TableCategory::ObservationsOnly => "observations_only",
            TableCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TableCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Species and Catch
// =============================================================================

/// What happened to a reported catch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    Retained,
    Discarded,
    Incidental,
}

/// Sustainability category of a species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeciesCategory {
    /// Species the fishery targets
    Target,
    /// Large predators whose catch affects the ecosystem
    IncidentalPredator,
    /// Other accompanying fauna
    #[default]
    Bycatch,
    /// Species normally returned to the sea
    Discard,
}

/// Registry information for one species
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpeciesInfo {
    pub category: SpeciesCategory,

    /// Catch of this species is measured against the target species
    #[serde(default)]
    pub indicator: bool,

    /// Sensitive species requiring special reporting
    #[serde(default)]
    pub sensitive: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,
}

/// A catch quantity: weight or individual count, never both
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Tons(f64),
    Units(u64),
}

/// One species catch line of a haul
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchEntry {
    pub species: String,
    pub quantity: Quantity,
    pub disposition: Disposition,
    pub category: SpeciesCategory,
}

impl CatchEntry {
    /// Weight in tons, zero for count entries
    pub fn quantity_tons(&self) -> f64 {
        match self.quantity {
            Quantity::Tons(tons) => tons,
            Quantity::Units(_) => 0.0,
        }
    }

    /// Individual count, zero for weight entries
    pub fn quantity_units(&self) -> u64 {
        match self.quantity {
            Quantity::Tons(_) => 0,
            Quantity::Units(units) => units,
        }
    }
}

// =============================================================================
// Hauls
// =============================================================================

/// Geographic position in decimal degrees; components absent when unparseable
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Position {
    pub fn is_complete(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// One deployment and retrieval of fishing gear, or the summary pseudo-haul
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Haul {
    pub number: u32,
    pub gear: String,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub start_position: Position,
    pub end_position: Position,
    pub observations: Option<String>,
    pub catches: Vec<CatchEntry>,
    pub is_summary_total: bool,
}

impl Haul {
    /// Create an empty individual haul
    pub fn new(number: u32, gear: impl Into<String>) -> Self {
        Self {
            number,
            gear: gear.into(),
            start_time: None,
            end_time: None,
            start_position: Position::default(),
            end_position: Position::default(),
            observations: None,
            catches: Vec::new(),
            is_summary_total: false,
        }
    }

    /// Create the summary pseudo-haul holding the official trip totals
    pub fn summary(
        catches: Vec<CatchEntry>,
        gear_label: impl Into<String>,
        start_time: Option<NaiveDateTime>,
        end_time: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            number: crate::constants::SUMMARY_HAUL_NUMBER,
            start_time,
            end_time,
            catches,
            is_summary_total: true,
            ..Self::new(crate::constants::SUMMARY_HAUL_NUMBER, gear_label)
        }
    }

    /// Append observation text, joining with a space onto any existing text
    pub fn append_observation(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        match &mut self.observations {
            Some(existing) => {
                existing.push(' ');
                existing.push_str(text);
            }
            None => self.observations = Some(text.to_string()),
        }
    }
}

// =============================================================================
// Trip Header
// =============================================================================

/// Trip metadata recovered from the general-information table and page text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TripHeader {
    pub trip_id: String,

    /// False when the identifier was synthesized rather than read from the document
    pub trip_id_verified: bool,

    pub vessel_name: Option<String>,
    pub vessel_registration: Option<String>,
    pub owner: Option<String>,
    pub captain: Option<String>,
    pub flag_country: Option<String>,
    pub call_sign: Option<String>,
    pub registry_type: Option<String>,
    pub registry_number: Option<String>,
    pub departure_port: Option<String>,
    pub departure_time: Option<NaiveDateTime>,
    pub arrival_port: Option<String>,
    pub arrival_time: Option<NaiveDateTime>,
    pub declared_hauls: u32,
    pub arrival_notice: Option<String>,
    pub rpa: Option<String>,
}

// =============================================================================
// Validation
// =============================================================================

/// Per-species totals; merged by pointwise addition
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpeciesAggregate {
    pub retained_tons: f64,
    pub discarded_tons: f64,
    pub units: u64,
}

impl SpeciesAggregate {
    /// Aggregate contribution of a single catch entry
    pub fn from_entry(entry: &CatchEntry) -> Self {
        match (entry.quantity, entry.disposition) {
            (Quantity::Tons(tons), Disposition::Retained) => Self {
                retained_tons: tons,
                ..Self::default()
            },
            (Quantity::Tons(tons), _) => Self {
                discarded_tons: tons,
                ..Self::default()
            },
            (Quantity::Units(units), _) => Self {
                units,
                ..Self::default()
            },
        }
    }
}

impl Add for SpeciesAggregate {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            retained_tons: self.retained_tons + other.retained_tons,
            discarded_tons: self.discarded_tons + other.discarded_tons,
            units: self.units.saturating_add(other.units),
        }
    }
}

impl AddAssign for SpeciesAggregate {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Ecosystem alert level derived from the indicator/target ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    #[default]
    Green,
    Yellow,
    Red,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertLevel::Green => f.write_str("green"),
            AlertLevel::Yellow => f.write_str("yellow"),
            AlertLevel::Red => f.write_str("red"),
        }
    }
}

/// Which entries the species totals were computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalsSource {
    Summary,
    Hauls,
}

/// A species whose summary total differs from the sum of its per-haul entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsDiscrepancy {
    pub species: String,
    pub summary: SpeciesAggregate,
    pub hauls: SpeciesAggregate,
}

/// Cross-validation of a finished trip record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub hauls_parsed: usize,
    pub hauls_declared: u32,
    pub haul_count_matches: bool,
    pub totals_source: TotalsSource,
    pub species_totals: BTreeMap<String, SpeciesAggregate>,
    pub target_retained_tons: f64,
    pub indicator_retained_tons: f64,
    /// Indicator/target ratio; `None` when no target catch was reported
    pub bycatch_ratio: Option<f64>,
    pub alert_level: AlertLevel,
    pub discrepancies: Vec<TotalsDiscrepancy>,
}

/// The structured result of parsing one logbook document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub header: TripHeader,
    /// Summary pseudo-haul first (when present), then individual hauls in document order
    pub hauls: Vec<Haul>,
    pub validation: ValidationReport,
}

impl TripRecord {
    /// The summary pseudo-haul, when the document carried a trip-total table
    pub fn summary_haul(&self) -> Option<&Haul> {
        self.hauls.iter().find(|haul| haul.is_summary_total)
    }

    /// Individual hauls, excluding the summary pseudo-haul
    pub fn individual_hauls(&self) -> impl Iterator<Item = &Haul> {
        self.hauls.iter().filter(|haul| !haul.is_summary_total)
    }
}
