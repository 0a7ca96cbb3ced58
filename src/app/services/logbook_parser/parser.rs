//! Core logbook parser implementation
//!
//! This module provides the parser orchestration: building the table stream,
//! running the sequential processor, extracting the header and validating the
//! assembled trip.

use chrono::{Local, NaiveDateTime};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::haul_tables::TableContext;
use super::header::HeaderExtractor;
use super::sequential::process_stream;
use super::stats::ParseResult;
use super::table_stream::{build_table_stream, full_text};
use crate::app::adapters::DocumentSource;
use crate::app::models::{Haul, Page, TripRecord};
use crate::app::services::species_registry::{SpeciesRegistry, StaticSpeciesRegistry};
use crate::app::services::validator::TripValidator;
use crate::config::ExtractorConfig;
use crate::Result;

/// Logbook parser turning extracted pages into trip records
///
/// The parser holds no per-document state, so one instance can be shared
/// across threads and used for any number of documents.
#[derive(Debug, Clone)]
pub struct LogbookParser {
    registry: Arc<dyn SpeciesRegistry>,
    config: ExtractorConfig,
    header_extractor: HeaderExtractor,
}

impl LogbookParser {
    /// Create a new parser with a species registry dependency
    ///
    /// # Errors
    /// * Returns `LogbookError::Configuration` if the configuration is inconsistent
    pub fn new(registry: Arc<dyn SpeciesRegistry>, config: ExtractorConfig) -> Result<Self> {
        config.validate()?;
        let header_extractor = HeaderExtractor::new(&config)?;
        Ok(Self {
            registry,
            config,
            header_extractor,
        })
    }

    /// Create a parser using the built-in species table
    pub fn with_builtin_registry(config: ExtractorConfig) -> Result<Self> {
        Self::new(Arc::new(StaticSpeciesRegistry::builtin()), config)
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn registry(&self) -> &dyn SpeciesRegistry {
        self.registry.as_ref()
    }

    /// Parse a document source, consuming it
    ///
    /// Only failures of the source itself are returned as errors; anything
    /// unexpected in the tables is recorded in the diagnostics.
    pub fn parse_document<S: DocumentSource>(&self, mut source: S) -> Result<ParseResult> {
        let name = source.name();
        info!("Parsing logbook: {}", name);

        let pages = source.pages()?;
        drop(source);

        Ok(self.parse_pages(&pages))
    }

    /// Parse already extracted pages
    pub fn parse_pages(&self, pages: &[Page]) -> ParseResult {
        self.parse_pages_at(pages, Local::now().naive_local())
    }

    /// Parse already extracted pages, using `now` if a trip identifier must be synthesized
    pub fn parse_pages_at(&self, pages: &[Page], now: NaiveDateTime) -> ParseResult {
        let stream = build_table_stream(pages);
        let text = full_text(pages);
        debug!("Table stream: {} tables over {} pages", stream.len(), pages.len());

        let ctx = TableContext {
            registry: self.registry.as_ref(),
            config: &self.config,
        };
        let (output, mut diagnostics) = process_stream(&stream, ctx);

        let header = self
            .header_extractor
            .extract_at(&stream, &text, now, &mut diagnostics);

        let mut hauls = Vec::with_capacity(output.hauls.len() + 1);
        if output.summary_seen && !output.summary_entries.is_empty() {
            hauls.push(Haul::summary(
                output.summary_entries,
                self.config.summary_gear_label.as_str(),
                header.departure_time,
                header.arrival_time,
            ));
        } else if output.summary_seen {
            warn!("Trip {}: summary section holds no catch rows", header.trip_id);
        }
        hauls.extend(output.hauls);

        let validation =
            TripValidator::new(self.registry.as_ref(), &self.config).validate(&header, &hauls);

        info!(
            "Trip {}: {} hauls ({} declared), {} tables, {} diagnostics, alert {}",
            header.trip_id,
            validation.hauls_parsed,
            validation.hauls_declared,
            diagnostics.tables_total,
            diagnostics.len(),
            validation.alert_level
        );

        ParseResult {
            record: TripRecord {
                header,
                hauls,
                validation,
            },
            diagnostics,
        }
    }
}
