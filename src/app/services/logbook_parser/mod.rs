//! Logbook parser for electronic catch-log reports
//!
//! This module turns the tables and page text of an extracted logbook into a
//! validated trip record. Documents have no stable schema: column counts vary
//! with context and a haul may be split across pages, so tables are classified
//! by content and attributed to hauls in a single ordered pass.
//!
//! ## Architecture
//!
//! - [`parser`] - Pipeline orchestration
//! - [`table_stream`] - Ordered, page-tagged table sequence
//! - [`classifier`] - Content-based table categories
//! - [`sequential`] - Haul attribution state machine
//! - [`haul_tables`] - Field extraction from haul, species and observation tables
//! - [`column_mapping`] - Species quantity column resolution
//! - [`species_rows`] - Species row to catch entries
//! - [`header`] - Trip header from the general-information table and page text
//! - [`field_parsers`] - Cell normalization and value parsing
//! - [`stats`] - Diagnostics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use logbook_extractor::app::models::{Page, RawTable};
//! use logbook_extractor::app::services::logbook_parser::LogbookParser;
//! use logbook_extractor::ExtractorConfig;
//!
//! # fn example() -> logbook_extractor::Result<()> {
//! let parser = LogbookParser::with_builtin_registry(ExtractorConfig::default())?;
//! let pages = vec![Page::new(
//!     vec![RawTable::from_strs(&[&["DETALLE DE LANCE", "", "", ""], &["LANCE #", "1", "", ""]])],
//!     "TOTAL DE LANCES 1",
//! )];
//!
//! let result = parser.parse_pages(&pages);
//! assert_eq!(result.record.hauls.len(), 1);
//! assert!(result.record.validation.haul_count_matches);
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod column_mapping;
pub mod field_parsers;
pub mod haul_tables;
pub mod header;
pub mod parser;
pub mod sequential;
pub mod species_rows;
pub mod stats;
pub mod table_stream;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use classifier::classify_table;
pub use column_mapping::{ColumnMap, resolve_columns};
pub use header::HeaderExtractor;
pub use parser::LogbookParser;
pub use species_rows::parse_species_row;
pub use stats::{Diagnostic, ParseDiagnostics, ParseResult};
pub use table_stream::{StreamTable, build_table_stream};
