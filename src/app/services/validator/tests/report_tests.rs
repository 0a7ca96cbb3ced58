//! Tests for the assembled validation report

use super::*;
use crate::app::models::{AlertLevel, TotalsSource};
use crate::app::services::species_registry::StaticSpeciesRegistry;
use crate::app::services::validator::TripValidator;
use crate::config::ExtractorConfig;

#[test]
fn test_declared_count_mismatch_is_reported() {
    let registry = StaticSpeciesRegistry::builtin();
    let config = ExtractorConfig::default();
    let validator = TripValidator::new(&registry, &config);

    let hauls: Vec<Haul> = (1..=13).map(|n| haul_with(n, Vec::new())).collect();
    let report = validator.validate(&header_declaring(14), &hauls);

    assert!(!report.haul_count_matches);
    assert_eq!(report.hauls_declared, 14);
    assert_eq!(report.hauls_parsed, 13);
}

#[test]
fn test_summary_haul_excluded_from_count_and_preferred_for_totals() {
    let registry = StaticSpeciesRegistry::builtin();
    let config = ExtractorConfig::default();
    let validator = TripValidator::new(&registry, &config);

    let summary = Haul::summary(
        vec![
            retained("Camarón nailon", 3.0, SpeciesCategory::Target),
            retained("Merluza común", 0.45, SpeciesCategory::IncidentalPredator),
        ],
        "CAPTURA TOTAL",
        None,
        None,
    );
    let hauls = vec![
        summary,
        haul_with(1, vec![retained("Camarón nailon", 1.0, SpeciesCategory::Target)]),
        haul_with(2, vec![retained("Camarón nailon", 2.0, SpeciesCategory::Target)]),
    ];

    let report = validator.validate(&header_declaring(2), &hauls);

    assert!(report.haul_count_matches);
    assert_eq!(report.totals_source, TotalsSource::Summary);
    assert_eq!(report.species_totals["Camarón nailon"].retained_tons, 3.0);
    assert_eq!(report.target_retained_tons, 3.0);
    assert_eq!(report.bycatch_ratio, Some(0.15));
    assert_eq!(report.alert_level, AlertLevel::Yellow);

    // Merluza appears only in the summary, so it is the single discrepancy
    assert_eq!(report.discrepancies.len(), 1);
    assert_eq!(report.discrepancies[0].species, "Merluza común");
}

#[test]
fn test_hauls_summed_without_summary() {
    let registry = StaticSpeciesRegistry::builtin();
    let config = ExtractorConfig::default();
    let validator = TripValidator::new(&registry, &config);

    let hauls = vec![
        haul_with(
            1,
            vec![
                retained("Camarón nailon", 1.5, SpeciesCategory::Target),
                retained("Merluza común", 0.5, SpeciesCategory::IncidentalPredator),
            ],
        ),
        haul_with(2, vec![retained("Camarón nailon", 0.5, SpeciesCategory::Target)]),
        haul_with(3, Vec::new()),
    ];

    let report = validator.validate(&header_declaring(3), &hauls);

    assert_eq!(report.totals_source, TotalsSource::Hauls);
    assert_eq!(report.species_totals["Camarón nailon"].retained_tons, 2.0);
    assert_eq!(report.bycatch_ratio, Some(0.25));
    assert_eq!(report.alert_level, AlertLevel::Red);
    assert!(report.discrepancies.is_empty());
    assert!(report.haul_count_matches);
}

#[test]
fn test_no_target_catch_is_green() {
    let registry = StaticSpeciesRegistry::builtin();
    let config = ExtractorConfig::default();
    let validator = TripValidator::new(&registry, &config);

    let hauls = vec![haul_with(
        1,
        vec![retained("Merluza común", 0.9, SpeciesCategory::IncidentalPredator)],
    )];
    let report = validator.validate(&header_declaring(1), &hauls);

    assert_eq!(report.bycatch_ratio, None);
    assert_eq!(report.alert_level, AlertLevel::Green);
    assert_eq!(report.indicator_retained_tons, 0.9);
}

#[test]
fn test_huge_counts_do_not_abort_validation() {
    let registry = StaticSpeciesRegistry::builtin();
    let config = ExtractorConfig::default();
    let validator = TripValidator::new(&registry, &config);

    let hauls = vec![
        haul_with(1, vec![incidental("Jaiba paco", u64::MAX - 1)]),
        haul_with(2, vec![incidental("Jaiba paco", 5)]),
    ];
    let report = validator.validate(&header_declaring(2), &hauls);

    assert!(report.haul_count_matches);
    assert_eq!(report.species_totals["Jaiba paco"].units, u64::MAX);
    assert_eq!(report.alert_level, AlertLevel::Green);
}
