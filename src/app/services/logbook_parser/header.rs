//! Trip header extraction
//!
//! The general-information table is the primary source. Fields it does not
//! provide are recovered from the concatenated page text with an ordered list
//! of declarative rules; the first matching rule wins for each field.

use chrono::{Local, NaiveDateTime};
use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::app::models::{RawTable, TableCategory, TripHeader};
use crate::config::ExtractorConfig;
use crate::constants::{SYNTHETIC_ID_TIMESTAMP_FORMAT, info_labels};
use crate::error::{LogbookError, Result};

use super::classifier::classify_table;
use super::field_parsers::{normalized_first_cell, parse_timestamp, row_cell};
use super::stats::{Diagnostic, ParseDiagnostics};
use super::table_stream::StreamTable;

/// Header fields that text rules can fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    TripId,
    DeclaredHauls,
    ArrivalNotice,
    Rpa,
    Owner,
    VesselName,
    Captain,
}

/// A text extraction rule: when `pattern` matches, `template` is expanded
/// with its captures and stored in `field`. Patterns ignore case.
#[derive(Debug, Clone)]
pub struct TextRule {
    pub field: HeaderField,
    pub pattern: Regex,
    pub template: String,
}

impl TextRule {
    fn new(field: HeaderField, pattern: &str, template: impl Into<String>) -> Result<Self> {
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                LogbookError::configuration(format!("Invalid header rule pattern: {}", e))
            })?;
        Ok(Self {
            field,
            pattern,
            template: template.into(),
        })
    }

    /// Expanded template for the first match in `text`
    pub fn apply(&self, text: &str) -> Option<String> {
        let captures = self.pattern.captures(text)?;
        let mut value = String::new();
        captures.expand(&self.template, &mut value);
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }
}

/// Header fields recovered so far, before defaults are applied
#[derive(Debug, Default)]
struct PartialHeader {
    header: TripHeader,
    trip_id: Option<String>,
    declared_hauls: Option<u32>,
}

impl PartialHeader {
    fn is_set(&self, field: HeaderField) -> bool {
        match field {
            HeaderField::TripId => self.trip_id.is_some(),
            HeaderField::DeclaredHauls => self.declared_hauls.is_some(),
            HeaderField::ArrivalNotice => self.header.arrival_notice.is_some(),
            HeaderField::Rpa => self.header.rpa.is_some(),
            HeaderField::Owner => self.header.owner.is_some(),
            HeaderField::VesselName => self.header.vessel_name.is_some(),
            HeaderField::Captain => self.header.captain.is_some(),
        }
    }

    fn set(&mut self, field: HeaderField, value: String) {
        match field {
            HeaderField::TripId => self.trip_id = Some(value),
            HeaderField::DeclaredHauls => match value.parse() {
                Ok(count) => self.declared_hauls = Some(count),
                Err(_) => debug!("Ignoring declared haul count '{}'", value),
            },
            HeaderField::ArrivalNotice => self.header.arrival_notice = Some(value),
            HeaderField::Rpa => self.header.rpa = Some(value),
            HeaderField::Owner => self.header.owner = Some(value),
            HeaderField::VesselName => self.header.vessel_name = Some(value),
            HeaderField::Captain => self.header.captain = Some(value),
        }
    }
}

/// Extracts the trip header from the table stream and page text
#[derive(Debug, Clone)]
pub struct HeaderExtractor {
    rules: Vec<TextRule>,
    config: ExtractorConfig,
}

impl HeaderExtractor {
    /// Build the extractor and its text rules for the configured identifier prefix
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        let prefix = regex::escape(&config.trip_id_prefix);
        let rules = vec![
            TextRule::new(
                HeaderField::TripId,
                &format!(r"{}\d{{4}}-\d+-\d+", prefix),
                "$0",
            )?,
            TextRule::new(
                HeaderField::TripId,
                r"N[°º]\s+BIT[ÁA]CORA\s+(\d+)",
                format!("{}-${{1}}", config.trip_id_prefix),
            )?,
            TextRule::new(HeaderField::DeclaredHauls, r"TOTAL\s+DE\s+LANCES\s+(\d+)", "$1")?,
            TextRule::new(
                HeaderField::ArrivalNotice,
                r"AVISO\s+(?:DE\s+)?RECALADA\s+(\d+)",
                "$1",
            )?,
            TextRule::new(HeaderField::Rpa, r"RPA\s+([^\n]+)", "$1")?,
            TextRule::new(HeaderField::Owner, r"(?m)^ARMADOR[:\s]+([^\n]+)", "$1")?,
            TextRule::new(HeaderField::VesselName, r"(?m)^EMBARCACI[OÓ]N[:\s]+([^\n]+)", "$1")?,
            TextRule::new(HeaderField::Captain, r"(?m)^CAPIT[AÁ]N[:\s]+([^\n]+)", "$1")?,
        ];

        Ok(Self {
            rules,
            config: config.clone(),
        })
    }

    /// The ordered text rules
    pub fn rules(&self) -> &[TextRule] {
        &self.rules
    }

    /// Extract the header, synthesizing an identifier from the current local time if needed
    pub fn extract(
        &self,
        stream: &[StreamTable<'_>],
        text: &str,
        diagnostics: &mut ParseDiagnostics,
    ) -> TripHeader {
        self.extract_at(stream, text, Local::now().naive_local(), diagnostics)
    }

    /// Extract the header using `now` for identifier synthesis
    pub fn extract_at(
        &self,
        stream: &[StreamTable<'_>],
        text: &str,
        now: NaiveDateTime,
        diagnostics: &mut ParseDiagnostics,
    ) -> TripHeader {
        let mut partial = PartialHeader::default();

        if let Some(entry) = stream
            .iter()
            .find(|entry| classify_table(entry.table) == TableCategory::GeneralInfo)
        {
            read_general_info(&mut partial.header, entry.table);
        } else {
            debug!("No general information table, relying on page text");
        }

        for rule in &self.rules {
            if partial.is_set(rule.field) {
                continue;
            }
            if let Some(value) = rule.apply(text) {
                debug!("Header {:?} recovered from text: {}", rule.field, value);
                partial.set(rule.field, value);
            }
        }

        let PartialHeader {
            mut header,
            trip_id,
            declared_hauls,
        } = partial;

        match trip_id {
            Some(trip_id) => {
                header.trip_id = trip_id;
                header.trip_id_verified = true;
            }
            None => {
                header.trip_id = format!(
                    "{}-TEMP-{}",
                    self.config.trip_id_prefix,
                    now.format(SYNTHETIC_ID_TIMESTAMP_FORMAT)
                );
                header.trip_id_verified = false;
                warn!("Trip identifier not found, using {}", header.trip_id);
                diagnostics.push(Diagnostic::IdentifierSynthesized {
                    trip_id: header.trip_id.clone(),
                });
            }
        }
        header.declared_hauls = declared_hauls.unwrap_or(0);

        if self.config.apply_header_defaults {
            self.apply_defaults(&mut header);
        }

        header
    }

    fn apply_defaults(&self, header: &mut TripHeader) {
        let defaults = &self.config.header_defaults;
        fill(&mut header.owner, &defaults.owner);
        fill(&mut header.vessel_name, &defaults.vessel_name);
        fill(&mut header.captain, &defaults.captain);
        fill(&mut header.departure_port, &defaults.departure_port);
        fill(&mut header.arrival_port, &defaults.arrival_port);
        fill(&mut header.flag_country, &defaults.flag_country);
    }
}

fn fill(field: &mut Option<String>, default: &str) {
    if field.is_none() {
        *field = Some(default.to_string());
    }
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

/// Map the labelled rows of the general-information table onto the header
fn read_general_info(header: &mut TripHeader, table: &RawTable) {
    for row in &table.rows {
        if row.len() < 2 {
            continue;
        }

        let label = normalized_first_cell(row);
        let value = row_cell(row, 1);
        let secondary = non_empty(row_cell(row, info_labels::SECONDARY_VALUE_COLUMN));

        match label.as_str() {
            info_labels::OWNER => header.owner = non_empty(value),
            info_labels::VESSEL => {
                header.vessel_name = non_empty(value);
                header.flag_country = secondary.or(header.flag_country.take());
            }
            info_labels::REGISTRATION => {
                header.vessel_registration = non_empty(value);
                header.call_sign = secondary.or(header.call_sign.take());
            }
            info_labels::CAPTAIN => header.captain = non_empty(value),
            info_labels::REGISTRY_TYPE => {
                header.registry_type = non_empty(value);
                header.registry_number = secondary.or(header.registry_number.take());
            }
            info_labels::DEPARTURE => {
                header.departure_time = timestamp_field("departure", value);
                header.departure_port = secondary.or(header.departure_port.take());
            }
            info_labels::ARRIVAL => {
                header.arrival_time = timestamp_field("arrival", value);
                header.arrival_port = secondary.or(header.arrival_port.take());
            }
            _ => {}
        }
    }
}

fn timestamp_field(field: &str, value: &str) -> Option<NaiveDateTime> {
    let timestamp = parse_timestamp(value);
    if timestamp.is_none() && !value.is_empty() {
        debug!("Could not parse {} time '{}'", field, value);
    }
    timestamp
}
