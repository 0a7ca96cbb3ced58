//! Species registry loading from JSON files
//!
//! A registry file is a JSON object mapping species names to their
//! information:
//!
//! ```json
//! {
//!   "Camarón nailon": { "category": "target" },
//!   "Merluza común": { "category": "incidental_predator", "indicator": true }
//! }
//! ```

use super::StaticSpeciesRegistry;
use crate::app::models::SpeciesInfo;
use crate::error::{LogbookError, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

impl StaticSpeciesRegistry {
    /// Load a registry from a JSON file
    ///
    /// # Errors
    /// * Returns `LogbookError::Registry` if the file cannot be read or parsed
    pub fn load_from_json(path: &Path) -> Result<Self> {
        debug!("Loading species registry from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| {
            LogbookError::registry(format!(
                "Failed to read species file {}: {}",
                path.display(),
                e
            ))
        })?;

        let registry = Self::from_json_str(&content).map_err(|e| {
            LogbookError::registry(format!("Invalid species file {}: {}", path.display(), e))
        })?;

        info!(
            "Loaded {} species from {}",
            registry.species_count(),
            path.display()
        );
        Ok(registry)
    }

    /// Parse a registry from JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        let entries: BTreeMap<String, SpeciesInfo> = serde_json::from_str(content)?;
        if entries.is_empty() {
            return Err(LogbookError::registry("Species table is empty"));
        }
        Ok(Self::from_entries(entries))
    }

    /// Extend this registry with the entries of a JSON file, replacing duplicates
    pub fn merge_from_json(mut self, path: &Path) -> Result<Self> {
        let overrides = Self::load_from_json(path)?;
        for name in overrides.names.iter() {
            let info = super::SpeciesRegistry::lookup(&overrides, name);
            self.insert(name.clone(), info);
        }
        Ok(self)
    }
}
