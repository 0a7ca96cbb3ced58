//! Per-species catch totals

use std::collections::{BTreeMap, BTreeSet};

use crate::app::models::{CatchEntry, SpeciesAggregate, TotalsDiscrepancy};

/// Fold catch entries into per-species aggregates
pub fn aggregate_species<'a, I>(entries: I) -> BTreeMap<String, SpeciesAggregate>
where
    I: IntoIterator<Item = &'a CatchEntry>,
{
    entries
        .into_iter()
        .fold(BTreeMap::new(), |mut totals, entry| {
            *totals.entry(entry.species.clone()).or_default() +=
                SpeciesAggregate::from_entry(entry);
            totals
        })
}

/// Species whose summary aggregate differs from the per-haul aggregate
///
/// Weights are compared within `tolerance_tons`; unit counts must match exactly.
/// A species missing on one side is compared against an empty aggregate.
pub fn find_discrepancies(
    summary: &BTreeMap<String, SpeciesAggregate>,
    hauls: &BTreeMap<String, SpeciesAggregate>,
    tolerance_tons: f64,
) -> Vec<TotalsDiscrepancy> {
    let species: BTreeSet<&String> = summary.keys().chain(hauls.keys()).collect();

    species
        .into_iter()
        .filter_map(|name| {
            let from_summary = summary.get(name).copied().unwrap_or_default();
            let from_hauls = hauls.get(name).copied().unwrap_or_default();

            let differs = (from_summary.retained_tons - from_hauls.retained_tons).abs()
                > tolerance_tons
                || (from_summary.discarded_tons - from_hauls.discarded_tons).abs() > tolerance_tons
                || from_summary.units != from_hauls.units;

            differs.then(|| TotalsDiscrepancy {
                species: name.clone(),
                summary: from_summary,
                hauls: from_hauls,
            })
        })
        .collect()
}
