//! Species registry service
//!
//! Maps species names as they appear in logbooks to their sustainability
//! category and monitoring flags. The parsing pipeline only reads from the
//! registry; unknown names resolve to the default (bycatch) information.

use crate::app::models::SpeciesInfo;
use crate::app::services::logbook_parser::field_parsers::normalize_label;
use std::collections::HashMap;
use std::fmt;

pub mod builtin;
pub mod loader;

#[cfg(test)]
pub mod tests;

/// Read-only species lookup injected into the parser
pub trait SpeciesRegistry: Send + Sync + fmt::Debug {
    /// Information for a species name; unknown names yield the default entry
    fn lookup(&self, name: &str) -> SpeciesInfo;
}

/// Species registry backed by an in-memory table keyed on normalized names
///
/// Lookups are case- and diacritic-insensitive, so `CAMARON NAILON` and
/// `Camarón nailon` resolve to the same entry.
#[derive(Debug, Clone)]
pub struct StaticSpeciesRegistry {
    /// Species information indexed by normalized name
    pub(crate) species: HashMap<String, SpeciesInfo>,

    /// Display names in insertion order, for listing
    pub(crate) names: Vec<String>,

    /// Information returned for names not in the table
    pub(crate) default_info: SpeciesInfo,
}

impl StaticSpeciesRegistry {
    /// Create an empty registry where every name resolves to the default entry
    pub fn empty() -> Self {
        Self {
            species: HashMap::new(),
            names: Vec::new(),
            default_info: SpeciesInfo::default(),
        }
    }

    /// Build a registry from `(name, info)` pairs; later duplicates replace earlier ones
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, SpeciesInfo)>,
        S: Into<String>,
    {
        let mut registry = Self::empty();
        for (name, info) in entries {
            registry.insert(name, info);
        }
        registry
    }

    /// Add or replace a species entry
    pub fn insert(&mut self, name: impl Into<String>, info: SpeciesInfo) {
        let name = name.into();
        let key = normalize_label(&name);
        if self.species.insert(key, info).is_none() {
            self.names.push(name);
        }
    }

    /// Override the information returned for unknown names
    pub fn with_default_info(mut self, info: SpeciesInfo) -> Self {
        self.default_info = info;
        self
    }

    /// Check if a species is present in the table
    pub fn contains(&self, name: &str) -> bool {
        self.species.contains_key(&normalize_label(name))
    }

    /// Get the number of species in the table
    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Species names in the order they were registered
    pub fn species_names(&self) -> &[String] {
        &self.names
    }
}

impl Default for StaticSpeciesRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SpeciesRegistry for StaticSpeciesRegistry {
    fn lookup(&self, name: &str) -> SpeciesInfo {
        self.species
            .get(&normalize_label(name))
            .cloned()
            .unwrap_or_else(|| self.default_info.clone())
    }
}
