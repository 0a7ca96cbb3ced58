//! Built-in species table for the crustacean trawl fishery

use super::StaticSpeciesRegistry;
use crate::app::models::{SpeciesCategory, SpeciesInfo};

struct BuiltinSpecies {
    name: &'static str,
    scientific_name: &'static str,
    category: SpeciesCategory,
    indicator: bool,
    sensitive: bool,
}

const fn species(
    name: &'static str,
    scientific_name: &'static str,
    category: SpeciesCategory,
) -> BuiltinSpecies {
    BuiltinSpecies {
        name,
        scientific_name,
        category,
        indicator: false,
        sensitive: false,
    }
}

const fn indicator(mut entry: BuiltinSpecies) -> BuiltinSpecies {
    entry.indicator = true;
    entry
}

const fn sensitive(mut entry: BuiltinSpecies) -> BuiltinSpecies {
    entry.sensitive = true;
    entry
}

const BUILTIN_SPECIES: &[BuiltinSpecies] = &[
    // Target species
    species("Camarón nailon", "Heterocarpus reedi", SpeciesCategory::Target),
    species("Langostino colorado", "Pleuroncodes monodon", SpeciesCategory::Target),
    // Quota-regulated predator, measured against the target catch
    indicator(species(
        "Merluza común",
        "Merluccius gayi",
        SpeciesCategory::IncidentalPredator,
    )),
    // Accompanying fauna
    species("Congrio negro", "Genypterus maculatus", SpeciesCategory::Bycatch),
    species("Lenguado de ojo grande", "Hippoglossina macrops", SpeciesCategory::Bycatch),
    species("Granadero pichirata", "Coelorinchus aconcagua", SpeciesCategory::Bycatch),
    species("Jaiba paco", "Mursia gaudichaudi", SpeciesCategory::Bycatch),
    species("Jaiba limón", "Hepatus chilensis", SpeciesCategory::Bycatch),
    // Sharks and rays
    sensitive(species("Tollo negro raspa", "Centroscyllium nigrum", SpeciesCategory::Bycatch)),
    sensitive(species("Raya volantín", "Dipturus trachyderma", SpeciesCategory::Bycatch)),
];

impl StaticSpeciesRegistry {
    /// Registry preloaded with the built-in species table
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_SPECIES.iter().map(|entry| {
            (
                entry.name,
                SpeciesInfo {
                    category: entry.category,
                    indicator: entry.indicator,
                    sensitive: entry.sensitive,
                    scientific_name: Some(entry.scientific_name.to_string()),
                },
            )
        }))
    }
}
