//! Configuration management and validation.
//!
//! Provides the extraction thresholds, alert bands and header fallback values
//! used by the parsing pipeline. Every field has a default, so a configuration
//! file only needs to name the values it overrides.

use crate::constants::{
    DEFAULT_DISCREPANCY_TOLERANCE_TONS, DEFAULT_GEAR, DEFAULT_GREEN_MAX_RATIO,
    DEFAULT_TRIP_ID_PREFIX, DEFAULT_YELLOW_MAX_RATIO, MIN_REPORTABLE_TONS, SUMMARY_GEAR_LABEL,
    header_defaults,
};
use crate::error::{LogbookError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Alert band thresholds for the indicator/target ratio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    /// Ratios up to and including this value are green
    pub green_max: f64,

    /// Ratios up to and including this value are yellow; above is red
    pub yellow_max: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            green_max: DEFAULT_GREEN_MAX_RATIO,
            yellow_max: DEFAULT_YELLOW_MAX_RATIO,
        }
    }
}

/// Values substituted for header fields the document does not provide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderDefaults {
    pub owner: String,
    pub vessel_name: String,
    pub captain: String,
    pub departure_port: String,
    pub arrival_port: String,
    pub flag_country: String,
}

impl Default for HeaderDefaults {
    fn default() -> Self {
        Self {
            owner: header_defaults::OWNER.to_string(),
            vessel_name: header_defaults::VESSEL.to_string(),
            captain: header_defaults::CAPTAIN.to_string(),
            departure_port: header_defaults::PORT.to_string(),
            arrival_port: header_defaults::PORT.to_string(),
            flag_country: header_defaults::FLAG_COUNTRY.to_string(),
        }
    }
}

/// Global configuration for logbook extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Smallest weight emitted as a catch entry, in tons
    pub min_reportable_tons: f64,

    /// Gear assumed when a haul table names none
    pub default_gear: String,

    /// Gear label of the summary pseudo-haul
    pub summary_gear_label: String,

    /// Prefix for recovered and synthesized trip identifiers
    pub trip_id_prefix: String,

    /// Alert bands for the indicator/target ratio
    pub alert_thresholds: AlertThresholds,

    /// Tolerance for summary vs per-haul discrepancies, in tons
    pub discrepancy_tolerance_tons: f64,

    /// Fill unset descriptive header fields with `header_defaults`
    pub apply_header_defaults: bool,

    /// Header fallback values
    pub header_defaults: HeaderDefaults,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_reportable_tons: MIN_REPORTABLE_TONS,
            default_gear: DEFAULT_GEAR.to_string(),
            summary_gear_label: SUMMARY_GEAR_LABEL.to_string(),
            trip_id_prefix: DEFAULT_TRIP_ID_PREFIX.to_string(),
            alert_thresholds: AlertThresholds::default(),
            discrepancy_tolerance_tons: DEFAULT_DISCREPANCY_TOLERANCE_TONS,
            apply_header_defaults: true,
            header_defaults: HeaderDefaults::default(),
        }
    }
}

impl ExtractorConfig {
    /// Load configuration overrides from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LogbookError::configuration(format!(
                "Cannot read configuration file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| {
            LogbookError::configuration(format!(
                "Invalid configuration file {}: {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Validate thresholds for consistency
    pub fn validate(&self) -> Result<()> {
        if !(self.min_reportable_tons > 0.0) {
            return Err(LogbookError::configuration(format!(
                "min_reportable_tons must be positive, got {}",
                self.min_reportable_tons
            )));
        }

        let thresholds = &self.alert_thresholds;
        if !(thresholds.green_max >= 0.0) || !(thresholds.yellow_max >= thresholds.green_max) {
            return Err(LogbookError::configuration(format!(
                "Alert thresholds must satisfy 0 <= green_max <= yellow_max, got {} / {}",
                thresholds.green_max, thresholds.yellow_max
            )));
        }

        if !(self.discrepancy_tolerance_tons >= 0.0) {
            return Err(LogbookError::configuration(format!(
                "discrepancy_tolerance_tons must be non-negative, got {}",
                self.discrepancy_tolerance_tons
            )));
        }

        if self.trip_id_prefix.trim().is_empty() {
            return Err(LogbookError::configuration(
                "trip_id_prefix cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Set the minimum reportable weight
    pub fn with_min_reportable_tons(mut self, tons: f64) -> Self {
        self.min_reportable_tons = tons;
        self
    }

    /// Set the alert band thresholds
    pub fn with_alert_thresholds(mut self, green_max: f64, yellow_max: f64) -> Self {
        self.alert_thresholds = AlertThresholds {
            green_max,
            yellow_max,
        };
        self
    }

    /// Set the default gear
    pub fn with_default_gear(mut self, gear: impl Into<String>) -> Self {
        self.default_gear = gear.into();
        self
    }

    /// Set the trip identifier prefix
    pub fn with_trip_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.trip_id_prefix = prefix.into();
        self
    }

    /// Leave unrecovered header fields empty instead of using defaults
    pub fn without_header_defaults(mut self) -> Self {
        self.apply_header_defaults = false;
        self
    }
}
