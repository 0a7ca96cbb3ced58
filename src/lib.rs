//! Logbook Extractor Library
//!
//! A Rust library for turning electronic fishing logbooks (bitácoras) into
//! structured trip records.
//!
//! This library provides tools for:
//! - Classifying the raw tables of an extracted logbook by content
//! - Attributing tables split across page breaks to the right haul
//! - Recovering header fields from the general-information table and page text
//! - Converting degree-minute coordinates to signed decimal degrees
//! - Totalling catches per species and computing the indicator species ratio
//! - Recording every structural surprise as a diagnostic instead of failing

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod coordinates;
        pub mod logbook_parser;
        pub mod species_registry;
        pub mod validator;
    }
    pub mod adapters;
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::adapters::{DocumentSource, ExtractedDocument};
pub use app::models::{CatchEntry, Haul, Page, RawTable, TripHeader, TripRecord};
pub use app::services::logbook_parser::{LogbookParser, ParseResult};
pub use config::ExtractorConfig;
pub use error::{LogbookError, Result};
