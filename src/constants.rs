//! Application constants for the logbook extractor
//!
//! This module contains the section markers, column tokens, thresholds and
//! default values used throughout the extraction pipeline. All markers are
//! stored in normalized form (upper-case ASCII, diacritics stripped) and are
//! compared against cells passed through `field_parsers::normalize_label`.

// =============================================================================
// Section Markers (first cell of a table)
// =============================================================================

/// Tokens that together name the general-information section
pub const GENERAL_INFO_TOKENS: &[&str] = &["INFORMACI", "GENERAL"];

/// Token naming the trip-total capture section
pub const SUMMARY_MARKER: &str = "CAPTURA TOTAL";

/// Tokens that together name a haul-detail section
pub const HAUL_DETAIL_TOKENS: &[&str] = &["DETALLE", "LANCE"];

/// Row labels used inside haul tables
pub mod haul_labels {
    /// Haul number label (appears together with `#`)
    pub const HAUL: &str = "LANCE";

    /// Symbol accompanying the haul number label
    pub const NUMBER_SIGN: &str = "#";

    /// Start time row label
    pub const START: &str = "INICIO";

    /// End time label inside the start time row
    pub const END: &str = "FIN";

    /// Latitude row label
    pub const LATITUDE: &str = "LATITUD";

    /// Longitude row label
    pub const LONGITUDE: &str = "LONGITUD";

    /// Tokens that together label the gear cell
    pub const GEAR_TOKENS: &[&str] = &["ARTE", "PESCA"];
}

/// Observations marker (first cell)
pub const OBSERVATIONS_MARKER: &str = "OBSERVACIONES";

/// Maximum row count for an observations-only table
pub const OBSERVATIONS_TABLE_MAX_ROWS: usize = 3;

/// Row marker for a haul reported without any catch
pub const NO_CATCH_MARKER: &str = "LANCE DECLARADO SIN CAPTURAS";

/// Cell values that carry no observation text
pub const EMPTY_OBSERVATION_VALUES: &[&str] = &["NONE", "DETALLE DE LANCE"];

// =============================================================================
// Species Table Tokens
// =============================================================================

/// Species column label
pub const SPECIES_LABEL: &str = "ESPECIE";

/// Retained catch column token
pub const RETAINED_TOKEN: &str = "RETENIDA";

/// Discarded catch column token
pub const DISCARDED_TOKEN: &str = "DESCARTADA";

/// Incidental catch column token
pub const INCIDENTAL_TOKEN: &str = "INCIDENTAL";

/// Weight unit token marking a tons column
pub const TONS_TOKEN: &str = "TON";

/// Tokens that mark a cell as a quantity column header
pub const QUANTITY_TOKENS: &[&str] =
    &[RETAINED_TOKEN, DISCARDED_TOKEN, INCIDENTAL_TOKEN, TONS_TOKEN];

/// Species names containing any of these are header or label rows, not data
pub const NON_DATA_NAME_MARKERS: &[&str] =
    &["ESPECIE", "CAPTURA", "TIPO", "LANCE", "OBSERVACIONES"];

/// Column count of the summary / continuation species layout
pub const SPECIES_TABLE_COLUMNS: usize = 6;

/// Minimum column count for a wide haul table
pub const WIDE_HAUL_TABLE_MIN_COLUMNS: usize = 8;

/// Number of leading rows searched for an embedded haul number
pub const HAUL_NUMBER_SCAN_ROWS: usize = 3;

/// Number of leading rows searched for a species header row
pub const SPECIES_HEADER_SCAN_ROWS: usize = 3;

/// Positional layout for headerless species tables:
/// index, name, retained t, discarded t, discarded n, incidental n
pub mod positional_layout {
    pub const INDEX: usize = 0;
    pub const NAME: usize = 1;
    pub const RETAINED_TONS: usize = 2;
    pub const DISCARDED_TONS: usize = 3;
    pub const DISCARDED_COUNT: usize = 4;
    pub const INCIDENTAL_COUNT: usize = 5;
}

// =============================================================================
// General Information Labels
// =============================================================================

pub mod info_labels {
    pub const OWNER: &str = "ARMADOR";
    pub const VESSEL: &str = "EMBARCACION";
    pub const REGISTRATION: &str = "MATRICULA";
    pub const CAPTAIN: &str = "CAPITAN";
    pub const REGISTRY_TYPE: &str = "TIPO REGISTRO";
    pub const DEPARTURE: &str = "ZARPE";
    pub const ARRIVAL: &str = "RECALADA";

    /// Column holding the secondary value of a general-information row
    pub const SECONDARY_VALUE_COLUMN: usize = 3;
}

// =============================================================================
// Thresholds and Defaults
// =============================================================================

/// Smallest weight worth reporting, in tons
pub const MIN_REPORTABLE_TONS: f64 = 0.001;

/// Upper bound (inclusive) of the green alert band
pub const DEFAULT_GREEN_MAX_RATIO: f64 = 0.10;

/// Upper bound (inclusive) of the yellow alert band
pub const DEFAULT_YELLOW_MAX_RATIO: f64 = 0.20;

/// Decimal places kept on the indicator/target ratio
pub const RATIO_DECIMALS: i32 = 3;

/// Decimal places kept on converted coordinates
pub const COORDINATE_DECIMALS: i32 = 6;

/// Tolerance when comparing summary totals against per-haul sums, in tons
pub const DEFAULT_DISCREPANCY_TOLERANCE_TONS: f64 = 0.001;

/// Gear assumed when a haul table names none
pub const DEFAULT_GEAR: &str = "ARRASTRE FONDO";

/// Gear label given to the summary pseudo-haul
pub const SUMMARY_GEAR_LABEL: &str = "CAPTURA TOTAL";

/// Sequence number of the summary pseudo-haul
pub const SUMMARY_HAUL_NUMBER: u32 = 0;

/// Prefix of recovered and synthesized trip identifiers
pub const DEFAULT_TRIP_ID_PREFIX: &str = "SERNAPESCA-BE";

/// Timestamp format used when synthesizing a trip identifier
pub const SYNTHETIC_ID_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Fallback header values
pub mod header_defaults {
    pub const OWNER: &str = "DESCONOCIDO";
    pub const VESSEL: &str = "DESCONOCIDA";
    pub const CAPTAIN: &str = "DESCONOCIDO";
    pub const PORT: &str = "QUINTERO";
    pub const FLAG_COUNTRY: &str = "CL";
}

/// Accepted timestamp formats, tried in order
pub const DATETIME_FORMATS: &[&str] = &["%d-%m-%Y %H:%M:%S", "%d/%m/%Y %H:%M:%S", "%d-%m-%Y %H:%M"];

/// Accepted date-only formats, tried after `DATETIME_FORMATS`
pub const DATE_FORMATS: &[&str] = &["%d-%m-%Y", "%d/%m/%Y"];

// =============================================================================
// CLI Defaults
// =============================================================================

/// File extension of extracted-table dumps
pub const DOCUMENT_DUMP_EXTENSION: &str = "json";

/// Suffix appended to output record files
pub const RECORD_OUTPUT_SUFFIX: &str = ".trip.json";

/// Upper bound on concurrently parsed documents
pub const MAX_PARALLEL_WORKERS: usize = 64;
