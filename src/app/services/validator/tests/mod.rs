//! Shared test utilities and fixtures for validator tests

use crate::app::models::{CatchEntry, Disposition, Haul, Quantity, SpeciesCategory, TripHeader};

pub mod report_tests;

/// Retained weight entry
pub fn retained(species: &str, tons: f64, category: SpeciesCategory) -> CatchEntry {
    CatchEntry {
        species: species.to_string(),
        quantity: Quantity::Tons(tons),
        disposition: Disposition::Retained,
        category,
    }
}

/// Discarded weight entry
pub fn discarded(species: &str, tons: f64) -> CatchEntry {
    CatchEntry {
        species: species.to_string(),
        quantity: Quantity::Tons(tons),
        disposition: Disposition::Discarded,
        category: SpeciesCategory::Bycatch,
    }
}

/// Incidental count entry
pub fn incidental(species: &str, units: u64) -> CatchEntry {
    CatchEntry {
        species: species.to_string(),
        quantity: Quantity::Units(units),
        disposition: Disposition::Incidental,
        category: SpeciesCategory::Bycatch,
    }
}

/// Individual haul carrying the given entries
pub fn haul_with(number: u32, catches: Vec<CatchEntry>) -> Haul {
    let mut haul = Haul::new(number, "ARRASTRE FONDO");
    haul.catches = catches;
    haul
}

/// Header declaring `declared_hauls` hauls
pub fn header_declaring(declared_hauls: u32) -> TripHeader {
    TripHeader {
        trip_id: "SERNAPESCA-BE2021-1234-1".to_string(),
        trip_id_verified: true,
        declared_hauls,
        ..TripHeader::default()
    }
}
