//! Parse command implementation
//!
//! Parses a batch of logbook dumps into trip records. Each document is parsed
//! on a blocking task; at most `--workers` documents are in flight at once.

use super::shared::{
    ExtractionStats, build_parser, create_progress_bar, discover_documents, is_critical_error,
    record_output_path, setup_logging,
};
use crate::app::adapters::ExtractedDocument;
use crate::app::models::AlertLevel;
use crate::app::services::logbook_parser::{LogbookParser, ParseResult};
use crate::cli::args::{ParseArgs, ReportFormat};
use crate::{LogbookError, Result};
use anyhow::Context;
use colored::*;
use futures::stream::{self, StreamExt};
use indicatif::HumanDuration;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::task;
use tracing::{debug, error, info, warn};

/// What one document produced
#[derive(Debug)]
struct DocumentOutcome {
    trip_id: String,
    hauls: usize,
    hauls_declared: u32,
    haul_count_matches: bool,
    diagnostics: usize,
    trip_id_verified: bool,
    bycatch_ratio: Option<f64>,
    alert_level: AlertLevel,
    /// File the record was written to
    written_to: Option<PathBuf>,
    /// Serialized record, when it goes to stdout
    json: Option<String>,
}

/// Parse command runner
///
/// 1. Set up logging and validate arguments
/// 2. Build the shared parser from the configuration and species files
/// 3. Parse documents concurrently, writing or collecting records
/// 4. Report batch statistics
pub async fn run_parse(args: ParseArgs) -> anyhow::Result<ExtractionStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), args.quiet)?;
    info!("Starting logbook extraction");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let parser = build_parser(args.config_file.as_deref(), args.species_file.as_deref())
        .context("Failed to build the logbook parser")?;

    let documents = discover_documents(&args.inputs)?;
    if documents.is_empty() {
        warn!("No logbook dumps found in the given inputs");
        return Ok(ExtractionStats::default());
    }

    if let Some(output_dir) = &args.output_dir {
        std::fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create output directory {}", output_dir.display())
        })?;
    }

    info!(
        "Parsing {} documents with {} workers",
        documents.len(),
        args.workers
    );

    let progress_bar = args
        .show_progress()
        .then(|| create_progress_bar(documents.len() as u64, "Parsing logbooks..."));

    let mut outcomes = stream::iter(documents.into_iter())
        .map(|path| {
            let parser = Arc::clone(&parser);
            let output_dir = args.output_dir.clone();
            let pretty = args.pretty;
            let pb = progress_bar.clone();
            async move {
                let task_path = path.clone();
                let result = task::spawn_blocking(move || {
                    parse_one(&parser, &task_path, output_dir.as_deref(), pretty)
                })
                .await
                .unwrap_or_else(|e| {
                    Err(LogbookError::processing_interrupted(format!(
                        "parse task failed: {}",
                        e
                    )))
                });

                if let Some(pb) = &pb {
                    pb.inc(1);
                }
                (path, result)
            }
        })
        .buffer_unordered(args.workers)
        .collect::<Vec<_>>()
        .await;

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("Parsing complete");
    }

    let mut stats = ExtractionStats::default();
    outcomes.sort_by(|a, b| a.0.cmp(&b.0));

    for (path, result) in outcomes {
        match result {
            Ok(outcome) => {
                if let Some(json) = &outcome.json {
                    println!("{}", json);
                }
                tally(&mut stats, outcome);
            }
            Err(e) => {
                error!("Failed to parse {}: {}", path.display(), e);
                stats.documents_failed += 1;
                if is_critical_error(&e) {
                    return Err(e).with_context(|| format!("Aborting batch at {}", path.display()));
                }
            }
        }
    }

    stats.processing_time = start_time.elapsed();

    // Records on stdout must stay machine-readable
    if args.output_dir.is_some() && !args.quiet {
        generate_report(&stats, args.report_format)?;
    }

    Ok(stats)
}

/// Parse one document and deliver its record
fn parse_one(
    parser: &LogbookParser,
    path: &Path,
    output_dir: Option<&Path>,
    pretty: bool,
) -> Result<DocumentOutcome> {
    let document = ExtractedDocument::load(path)?;
    let result = parser.parse_document(document)?;

    for entry in result.diagnostics.iter() {
        debug!("{}: {}", path.display(), entry);
    }

    // Diagnostics travel with the record
    let json = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };

    let (written_to, json) = match output_dir {
        Some(dir) => {
            let output_path = record_output_path(dir, path);
            std::fs::write(&output_path, json)?;
            debug!("Wrote {}", output_path.display());
            (Some(output_path), None)
        }
        None => (None, Some(json)),
    };

    let ParseResult {
        record,
        diagnostics,
    } = result;

    Ok(DocumentOutcome {
        trip_id: record.header.trip_id,
        hauls: record.validation.hauls_parsed,
        hauls_declared: record.validation.hauls_declared,
        haul_count_matches: record.validation.haul_count_matches,
        diagnostics: diagnostics.len(),
        trip_id_verified: record.header.trip_id_verified,
        bycatch_ratio: record.validation.bycatch_ratio,
        alert_level: record.validation.alert_level,
        written_to,
        json,
    })
}

fn tally(stats: &mut ExtractionStats, outcome: DocumentOutcome) {
    stats.documents_processed += 1;
    stats.hauls_extracted += outcome.hauls;
    stats.diagnostics_recorded += outcome.diagnostics;
    stats.record_alert(outcome.alert_level);

    if !outcome.trip_id_verified {
        stats.unverified_identifiers += 1;
    }
    if !outcome.haul_count_matches {
        stats.haul_count_mismatches += 1;
        warn!(
            "{}: {} hauls parsed, {} declared",
            outcome.trip_id, outcome.hauls, outcome.hauls_declared
        );
    }
    if outcome.alert_level != AlertLevel::Green {
        info!(
            "{}: indicator ratio {:?}, alert {}",
            outcome.trip_id, outcome.bycatch_ratio, outcome.alert_level
        );
    }
    if let Some(path) = outcome.written_to {
        stats.records_written.push(path);
    }
}

fn generate_report(stats: &ExtractionStats, format: ReportFormat) -> anyhow::Result<()> {
    match format {
        ReportFormat::Human => {
            generate_human_report(stats);
            Ok(())
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(stats)?);
            Ok(())
        }
    }
}

fn generate_human_report(stats: &ExtractionStats) {
    println!("\n{}", "Extraction Summary".bright_green().bold());
    println!(
        "  {} {} of {} ({:.1}%)",
        "Documents parsed:".bright_cyan(),
        stats.documents_processed.to_string().bright_white().bold(),
        stats.documents_processed + stats.documents_failed,
        stats.success_rate()
    );
    if stats.documents_failed > 0 {
        println!(
            "  {} {}",
            "Failed:".bright_cyan(),
            stats.documents_failed.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {}",
        "Hauls extracted:".bright_cyan(),
        stats.hauls_extracted.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Diagnostics:".bright_cyan(),
        stats.diagnostics_recorded
    );
    println!(
        "  {} {}",
        "Haul count mismatches:".bright_cyan(),
        stats.haul_count_mismatches
    );
    println!(
        "  {} {}",
        "Synthesized trip ids:".bright_cyan(),
        stats.unverified_identifiers
    );
    println!(
        "  {} {} / {} / {}",
        "Alerts (green/yellow/red):".bright_cyan(),
        stats.green_alerts.to_string().bright_green(),
        stats.yellow_alerts.to_string().bright_yellow(),
        stats.red_alerts.to_string().bright_red()
    );
    println!(
        "  {} {}",
        "Processing time:".bright_cyan(),
        HumanDuration(stats.processing_time)
    );
}
