//! Indicator/target ratio and alert banding

use crate::app::models::{AlertLevel, CatchEntry, Disposition, SpeciesCategory};
use crate::app::services::coordinates::round_to;
use crate::app::services::species_registry::SpeciesRegistry;
use crate::config::AlertThresholds;
use crate::constants::RATIO_DECIMALS;

/// Retained tons of target and indicator species
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RoleTotals {
    pub target: f64,
    pub indicator: f64,
}

/// Sum retained weight of target-category and indicator species
pub fn retained_by_role<'a, I>(entries: I, registry: &dyn SpeciesRegistry) -> RoleTotals
where
    I: IntoIterator<Item = &'a CatchEntry>,
{
    entries
        .into_iter()
        .filter(|entry| entry.disposition == Disposition::Retained)
        .fold(RoleTotals::default(), |mut totals, entry| {
            let tons = entry.quantity_tons();
            if entry.category == SpeciesCategory::Target {
                totals.target += tons;
            }
            if registry.lookup(&entry.species).indicator {
                totals.indicator += tons;
            }
            totals
        })
}

/// Indicator/target ratio rounded to three decimals; `None` without target catch
pub fn bycatch_ratio(indicator_tons: f64, target_tons: f64) -> Option<f64> {
    if target_tons <= 0.0 {
        return None;
    }
    Some(round_to(indicator_tons / target_tons, RATIO_DECIMALS))
}

/// Alert band for a ratio; an undefined ratio is green
pub fn alert_level(ratio: Option<f64>, thresholds: &AlertThresholds) -> AlertLevel {
    match ratio {
        None => AlertLevel::Green,
        Some(ratio) if ratio <= thresholds.green_max => AlertLevel::Green,
        Some(ratio) if ratio <= thresholds.yellow_max => AlertLevel::Yellow,
        Some(_) => AlertLevel::Red,
    }
}
