//! Integration tests for the logbook parser with a realistic multi-page dump
//!
//! The sample document carries a summary table continued onto a second page,
//! a haul split between a narrow detail table and a wide continuation, a haul
//! declared without catch and a trailing signature table.

use logbook_extractor::app::models::{AlertLevel, Disposition, Quantity, TotalsSource};
use logbook_extractor::app::services::logbook_parser::Diagnostic;
use logbook_extractor::app::services::species_registry::StaticSpeciesRegistry;
use logbook_extractor::{
    DocumentSource, ExtractedDocument, ExtractorConfig, LogbookError, LogbookParser, TripRecord,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

fn sample_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("sample_logbook.json")
}

fn parse_sample(parser: &LogbookParser) -> logbook_extractor::ParseResult {
    let document = ExtractedDocument::load(&sample_path()).expect("sample dump should load");
    parser
        .parse_document(document)
        .expect("sample dump should parse")
}

#[test]
fn test_sample_document_header() {
    let parser = LogbookParser::with_builtin_registry(ExtractorConfig::default()).unwrap();
    let header = parse_sample(&parser).record.header;

    assert_eq!(header.trip_id, "SERNAPESCA-BE-1405");
    assert!(header.trip_id_verified);
    assert_eq!(header.declared_hauls, 3);
    assert_eq!(header.arrival_notice.as_deref(), Some("88231"));
    assert_eq!(header.rpa.as_deref(), Some("960123 CAMARÓN NAILON"));
    assert_eq!(header.vessel_name.as_deref(), Some("DON TITO"));
    assert_eq!(header.call_sign.as_deref(), Some("CB-4567"));
    assert_eq!(header.arrival_port.as_deref(), Some("SAN ANTONIO"));
}

#[test]
fn test_sample_document_hauls() {
    let parser = LogbookParser::with_builtin_registry(ExtractorConfig::default()).unwrap();
    let result = parse_sample(&parser);
    let record = &result.record;

    // Summary pseudo-haul first, with both pages of summary rows
    let summary = &record.hauls[0];
    assert!(summary.is_summary_total);
    assert_eq!(summary.catches.len(), 5);
    assert_eq!(summary.start_time, record.header.departure_time);

    let hauls: Vec<_> = record.individual_hauls().collect();
    assert_eq!(hauls.len(), 3);

    // Haul 1 was split over a detail table, a continuation and a species page
    let first = hauls[0];
    assert_eq!(first.number, 1);
    assert_eq!(first.gear, "ARRASTRE FONDO");
    assert!(first.start_time.is_some() && first.end_time.is_some());
    let start_lat = first.start_position.latitude.unwrap();
    assert!((start_lat - -35.035990).abs() < 1e-6);
    assert_eq!(first.start_position.longitude, Some(-72.175));
    assert_eq!(first.end_position.longitude, Some(-72.1875));
    assert_eq!(first.catches.len(), 5);
    assert_eq!(first.observations.as_deref(), Some("Lance con corriente fuerte"));

    let jaiba = first
        .catches
        .iter()
        .find(|entry| entry.species == "Jaiba paco")
        .unwrap();
    assert_eq!(jaiba.quantity, Quantity::Units(350));
    assert_eq!(jaiba.disposition, Disposition::Discarded);

    assert_eq!(hauls[1].number, 2);
    assert_eq!(hauls[1].catches.len(), 2);

    // A haul declared without catch is kept
    assert_eq!(hauls[2].number, 3);
    assert!(hauls[2].catches.is_empty());
    assert!(hauls[2].start_time.is_some());

    assert_eq!(
        result.diagnostics.entries,
        vec![Diagnostic::UnknownTable {
            page: 2,
            first_cell: "FIRMA CAPITÁN".to_string(),
        }]
    );
}

#[test]
fn test_sample_document_validation() {
    let parser = LogbookParser::with_builtin_registry(ExtractorConfig::default()).unwrap();
    let validation = parse_sample(&parser).record.validation;

    assert_eq!(validation.hauls_parsed, 3);
    assert!(validation.haul_count_matches);
    assert_eq!(validation.totals_source, TotalsSource::Summary);
    assert!(validation.discrepancies.is_empty());
    assert_eq!(validation.species_totals["Raya volantín"].units, 2);
    assert_eq!(validation.bycatch_ratio, Some(0.122));
    assert_eq!(validation.alert_level, AlertLevel::Yellow);
}

#[test]
fn test_alert_thresholds_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("extractor.json");
    std::fs::write(
        &config_path,
        r#"{"alert_thresholds": {"green_max": 0.05, "yellow_max": 0.1}}"#,
    )
    .unwrap();

    let config = ExtractorConfig::load(&config_path).unwrap();
    let parser = LogbookParser::with_builtin_registry(config).unwrap();
    let validation = parse_sample(&parser).record.validation;

    assert_eq!(validation.bycatch_ratio, Some(0.122));
    assert_eq!(validation.alert_level, AlertLevel::Red);
}

#[test]
fn test_custom_species_registry_changes_roles() {
    let temp_dir = TempDir::new().unwrap();
    let species_path = temp_dir.path().join("species.json");
    std::fs::write(
        &species_path,
        r#"{
            "Merluza común": {"category": "incidental_predator", "indicator": false},
            "Raya volantín": {"category": "incidental_predator", "indicator": true, "sensitive": true}
        }"#,
    )
    .unwrap();

    let registry = StaticSpeciesRegistry::builtin()
        .merge_from_json(&species_path)
        .unwrap();
    let parser = LogbookParser::new(Arc::new(registry), ExtractorConfig::default()).unwrap();
    let validation = parse_sample(&parser).record.validation;

    // Raya is only counted in units, so no indicator weight remains
    assert_eq!(validation.indicator_retained_tons, 0.0);
    assert_eq!(validation.bycatch_ratio, Some(0.0));
    assert_eq!(validation.alert_level, AlertLevel::Green);
}

#[test]
fn test_record_serialization() {
    let parser = LogbookParser::with_builtin_registry(ExtractorConfig::default()).unwrap();
    let record = parse_sample(&parser).record;

    let json = serde_json::to_string(&record).unwrap();
    assert!(json.contains(r#""alert_level":"yellow""#));
    assert!(json.contains(r#""is_summary_total":true"#));

    let restored: TripRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.header, record.header);
    assert_eq!(restored.hauls.len(), record.hauls.len());
    assert_eq!(restored.hauls[1].catches, record.hauls[1].catches);
    assert_eq!(restored.validation.alert_level, AlertLevel::Yellow);
}

#[test]
fn test_document_source_errors_propagate() {
    struct FailingSource;

    impl DocumentSource for FailingSource {
        fn name(&self) -> String {
            "failing".to_string()
        }

        fn pages(&mut self) -> logbook_extractor::Result<Vec<logbook_extractor::Page>> {
            Err(LogbookError::extraction("failing", "table extraction crashed"))
        }
    }

    let parser = LogbookParser::with_builtin_registry(ExtractorConfig::default()).unwrap();
    let result = parser.parse_document(FailingSource);
    assert!(matches!(result, Err(LogbookError::Extraction { .. })));
}
