//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! the command implementations.

use crate::app::models::AlertLevel;
use crate::app::services::logbook_parser::LogbookParser;
use crate::app::services::species_registry::StaticSpeciesRegistry;
use crate::config::ExtractorConfig;
use crate::constants::{DOCUMENT_DUMP_EXTENSION, RECORD_OUTPUT_SUFFIX};
use crate::{LogbookError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Batch statistics for reporting
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionStats {
    /// Number of documents parsed into records
    pub documents_processed: usize,
    /// Number of documents that could not be read
    pub documents_failed: usize,
    /// Individual hauls across all records
    pub hauls_extracted: usize,
    /// Diagnostics across all records
    pub diagnostics_recorded: usize,
    /// Records whose trip identifier had to be synthesized
    pub unverified_identifiers: usize,
    /// Records whose parsed haul count differs from the declared count
    pub haul_count_mismatches: usize,
    /// Records per alert level
    pub green_alerts: usize,
    pub yellow_alerts: usize,
    pub red_alerts: usize,
    /// Total processing time
    pub processing_time: std::time::Duration,
    /// Record files written
    pub records_written: Vec<PathBuf>,
}

impl ExtractionStats {
    /// Count one record at `alert` level
    pub fn record_alert(&mut self, alert: AlertLevel) {
        match alert {
            AlertLevel::Green => self.green_alerts += 1,
            AlertLevel::Yellow => self.yellow_alerts += 1,
            AlertLevel::Red => self.red_alerts += 1,
        }
    }

    /// Share of documents parsed, as a percentage
    pub fn success_rate(&self) -> f64 {
        let total = self.documents_processed + self.documents_failed;
        if total == 0 {
            0.0
        } else {
            (self.documents_processed as f64 / total as f64) * 100.0
        }
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("logbook_extractor={}", log_level)));

    let layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr);

    let installed = if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.compact())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.with_timer(fmt::time::uptime()))
            .try_init()
    };

    installed.map_err(|e| {
        LogbookError::configuration(format!("Failed to initialize logging: {}", e))
    })?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Build the parser from optional configuration and species registry files
pub fn build_parser(
    config_file: Option<&Path>,
    species_file: Option<&Path>,
) -> Result<Arc<LogbookParser>> {
    let config = match config_file {
        Some(path) => {
            info!("Using config file: {}", path.display());
            ExtractorConfig::load(path)?
        }
        None => ExtractorConfig::default(),
    };

    let mut registry = StaticSpeciesRegistry::builtin();
    if let Some(path) = species_file {
        registry = registry.merge_from_json(path)?;
        info!(
            "Species registry: {} species after merging {}",
            registry.species_count(),
            path.display()
        );
    }

    Ok(Arc::new(LogbookParser::new(Arc::new(registry), config)?))
}

/// Expand input paths into the sorted list of page dumps to parse
///
/// Files are taken as given; directories are searched recursively for `.json`
/// dumps, skipping record files written by a previous run.
pub fn discover_documents(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();

    for input in inputs {
        if input.is_file() {
            documents.push(input.clone());
            continue;
        }

        for entry in WalkDir::new(input).follow_links(false) {
            let entry = entry.map_err(|e| {
                LogbookError::configuration(format!(
                    "Failed to read directory {}: {}",
                    input.display(),
                    e
                ))
            })?;

            let path = entry.path();
            if path.is_file() && is_page_dump(path) {
                documents.push(path.to_path_buf());
            }
        }
    }

    documents.sort();
    documents.dedup();

    debug!("Discovered {} logbook dumps", documents.len());
    Ok(documents)
}

fn is_page_dump(path: &Path) -> bool {
    let is_json = path.extension().and_then(|s| s.to_str()) == Some(DOCUMENT_DUMP_EXTENSION);
    let is_record = path
        .file_name()
        .and_then(|s| s.to_str())
        .is_some_and(|name| name.ends_with(RECORD_OUTPUT_SUFFIX));
    is_json && !is_record
}

/// Output path of the record for `document` inside `output_dir`
pub fn record_output_path(output_dir: &Path, document: &Path) -> PathBuf {
    let stem = document
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("logbook");
    output_dir.join(format!("{}{}", stem, RECORD_OUTPUT_SUFFIX))
}

/// Check if an error should stop the whole batch
pub fn is_critical_error(error: &LogbookError) -> bool {
    matches!(
        error,
        LogbookError::Configuration { .. }
            | LogbookError::Registry { .. }
            | LogbookError::ProcessingInterrupted { .. }
    )
}

/// Create a progress bar with the standard styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} ETA: {eta}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");

    let pb = ProgressBar::new(total);
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_extraction_stats_default() {
        let stats = ExtractionStats::default();
        assert_eq!(stats.documents_processed, 0);
        assert_eq!(stats.success_rate(), 0.0);
    }

    #[test]
    fn test_success_rate_and_alerts() {
        let mut stats = ExtractionStats {
            documents_processed: 3,
            documents_failed: 1,
            ..Default::default()
        };
        stats.record_alert(AlertLevel::Red);
        stats.record_alert(AlertLevel::Green);
        stats.record_alert(AlertLevel::Red);

        assert_eq!(stats.success_rate(), 75.0);
        assert_eq!(stats.red_alerts, 2);
        assert_eq!(stats.green_alerts, 1);
        assert_eq!(stats.yellow_alerts, 0);
    }

    #[test]
    fn test_discover_documents() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("2021");
        fs::create_dir_all(&nested).unwrap();

        fs::write(temp_dir.path().join("b.json"), "{}").unwrap();
        fs::write(nested.join("a.json"), "{}").unwrap();
        fs::write(nested.join("a.trip.json"), "{}").unwrap();
        fs::write(nested.join("notes.txt"), "").unwrap();

        let documents = discover_documents(&[temp_dir.path().to_path_buf()]).unwrap();
        assert_eq!(documents, vec![nested.join("a.json"), temp_dir.path().join("b.json")]);

        // Explicit files are kept as given, and duplicates collapse
        let explicit = temp_dir.path().join("b.json");
        let documents =
            discover_documents(&[explicit.clone(), temp_dir.path().to_path_buf()]).unwrap();
        assert_eq!(documents.len(), 2);
        assert!(documents.contains(&explicit));
    }

    #[test]
    fn test_record_output_path() {
        let path = record_output_path(Path::new("/out"), Path::new("/in/bitacora_1405.json"));
        assert_eq!(path, PathBuf::from("/out/bitacora_1405.trip.json"));
    }

    #[test]
    fn test_build_parser_with_defaults() {
        let parser = build_parser(None, None).unwrap();
        assert!(parser.registry().lookup("Merluza común").indicator);
        assert_eq!(parser.config(), &ExtractorConfig::default());
    }

    #[test]
    fn test_critical_errors() {
        assert!(is_critical_error(&LogbookError::configuration("bad")));
        assert!(!is_critical_error(&LogbookError::extraction("doc", "bad dump")));
    }
}
