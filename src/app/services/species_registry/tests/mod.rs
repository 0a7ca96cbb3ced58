//! Shared test utilities and fixtures for species registry tests

use crate::app::models::{SpeciesCategory, SpeciesInfo};
use std::fs;
use std::path::{Path, PathBuf};


/// Create species information with the given category and no flags
pub fn create_test_info(category: SpeciesCategory) -> SpeciesInfo {
    SpeciesInfo {
        category,
        ..SpeciesInfo::default()
    }
}

/// Write a species JSON file into `dir` and return its path
pub fn write_species_file(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("species.json");
    fs::write(&path, content).unwrap();
    path
}
