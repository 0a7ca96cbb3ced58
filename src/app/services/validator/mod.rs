//! Trip validation service
//!
//! Cross-checks a finished trip: reconciles the declared haul count with the
//! hauls assembled, totals catches per species and derives the indicator
//! species ratio that drives the ecosystem alert.
//!
//! ## Architecture
//!
//! - [`totals`] - Per-species aggregation and summary/haul discrepancies
//! - [`ratio`] - Indicator/target ratio and alert banding

use tracing::{debug, warn};

use crate::app::models::{Haul, TotalsSource, TripHeader, ValidationReport};
use crate::app::services::species_registry::SpeciesRegistry;
use crate::config::ExtractorConfig;

pub mod ratio;
pub mod totals;

#[cfg(test)]
pub mod tests;

pub use ratio::{alert_level, bycatch_ratio};
pub use totals::{aggregate_species, find_discrepancies};

/// Validates trip records against the species registry and configured thresholds
#[derive(Debug, Clone, Copy)]
pub struct TripValidator<'a> {
    registry: &'a dyn SpeciesRegistry,
    config: &'a ExtractorConfig,
}

impl<'a> TripValidator<'a> {
    pub fn new(registry: &'a dyn SpeciesRegistry, config: &'a ExtractorConfig) -> Self {
        Self { registry, config }
    }

    /// Build the validation report for a header and its hauls
    ///
    /// Totals come from the summary pseudo-haul when one is present and from
    /// the individual hauls otherwise; the two sources are never added together.
    pub fn validate(&self, header: &TripHeader, hauls: &[Haul]) -> ValidationReport {
        let summary = hauls.iter().find(|haul| haul.is_summary_total);
        let individual: Vec<&Haul> = hauls.iter().filter(|haul| !haul.is_summary_total).collect();

        let summary_entries = summary.map(|haul| haul.catches.iter());
        let haul_entries = || individual.iter().flat_map(|haul| haul.catches.iter());

        let (totals_source, species_totals, ratio_inputs) = match summary_entries {
            Some(entries) => (
                TotalsSource::Summary,
                aggregate_species(entries.clone()),
                ratio::retained_by_role(entries, self.registry),
            ),
            None => (
                TotalsSource::Hauls,
                aggregate_species(haul_entries()),
                ratio::retained_by_role(haul_entries(), self.registry),
            ),
        };

        let discrepancies = if summary.is_some() && !individual.is_empty() {
            find_discrepancies(
                &species_totals,
                &aggregate_species(haul_entries()),
                self.config.discrepancy_tolerance_tons,
            )
        } else {
            Vec::new()
        };

        let bycatch_ratio = bycatch_ratio(ratio_inputs.indicator, ratio_inputs.target);
        let alert_level = alert_level(bycatch_ratio, &self.config.alert_thresholds);

        let hauls_parsed = individual.len();
        let hauls_declared = header.declared_hauls;
        let haul_count_matches = hauls_parsed == hauls_declared as usize;

        if !haul_count_matches {
            warn!(
                "Trip {}: {} hauls declared but {} parsed",
                header.trip_id, hauls_declared, hauls_parsed
            );
        }
        if !discrepancies.is_empty() {
            warn!(
                "Trip {}: {} species differ between summary and haul totals",
                header.trip_id,
                discrepancies.len()
            );
        }
        debug!(
            "Trip {}: ratio {:?}, alert {}",
            header.trip_id, bycatch_ratio, alert_level
        );

        ValidationReport {
            hauls_parsed,
            hauls_declared,
            haul_count_matches,
            totals_source,
            species_totals,
            target_retained_tons: ratio_inputs.target,
            indicator_retained_tons: ratio_inputs.indicator,
            bycatch_ratio,
            alert_level,
            discrepancies,
        }
    }
}
