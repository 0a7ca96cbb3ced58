//! Document sources
//!
//! The parser never reads the native document format. It consumes pages that
//! an extraction layer has already split into tables and text, through the
//! [`DocumentSource`] trait. [`ExtractedDocument`] reads such pages from a JSON
//! dump:
//!
//! ```json
//! {"pages": [{"text": "...", "tables": [[["LANCE #", "5", null], ["INICIO", "..."]]]}]}
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::app::models::Page;
use crate::error::{LogbookError, Result};

/// A provider of extracted pages for one document
///
/// Sources are consumed by value; any resources they hold are released when
/// the source is dropped, whether extraction succeeded or not.
pub trait DocumentSource {
    /// Name used in logs and errors
    fn name(&self) -> String;

    /// Pages of the document in reading order
    fn pages(&mut self) -> Result<Vec<Page>>;
}

impl DocumentSource for Vec<Page> {
    fn name(&self) -> String {
        "in-memory document".to_string()
    }

    fn pages(&mut self) -> Result<Vec<Page>> {
        Ok(std::mem::take(self))
    }
}

/// Pages serialized as JSON by an external extraction step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Path the document was read from, when loaded from disk
    #[serde(skip)]
    pub source_path: Option<PathBuf>,

    #[serde(default)]
    pub pages: Vec<Page>,
}

impl ExtractedDocument {
    pub fn new(pages: Vec<Page>) -> Self {
        Self {
            source_path: None,
            pages,
        }
    }

    /// Load a JSON page dump from disk
    ///
    /// # Errors
    /// * Returns `LogbookError::DocumentNotFound` if the path does not exist
    /// * Returns `LogbookError::Extraction` if the file is not a valid page dump
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LogbookError::DocumentNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let mut document: Self = serde_json::from_str(&content).map_err(|e| {
            LogbookError::extraction(
                path.display().to_string(),
                format!("invalid page dump: {}", e),
            )
        })?;
        document.source_path = Some(path.to_path_buf());

        debug!(
            "Loaded {} pages with {} tables from {}",
            document.pages.len(),
            document.table_count(),
            path.display()
        );
        Ok(document)
    }

    /// Total number of tables across all pages
    pub fn table_count(&self) -> usize {
        self.pages.iter().map(|page| page.tables.len()).sum()
    }
}

impl DocumentSource for ExtractedDocument {
    fn name(&self) -> String {
        self.source_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "extracted document".to_string())
    }

    fn pages(&mut self) -> Result<Vec<Page>> {
        Ok(std::mem::take(&mut self.pages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_page_dump() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"pages": [{{"text": "BITACORA", "tables": [[["LANCE #", "5", null]]]}}, {{"tables": []}}]}}"#
        )
        .unwrap();

        let mut document = ExtractedDocument::load(file.path()).unwrap();
        assert_eq!(document.table_count(), 1);
        assert_eq!(document.name(), file.path().display().to_string());

        let pages = document.pages().unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].text, "BITACORA");
        assert_eq!(pages[0].tables[0].rows[0][2], None);
        assert_eq!(pages[1].text, "");
    }

    #[test]
    fn test_missing_document() {
        let result = ExtractedDocument::load(Path::new("/nonexistent/dump.json"));
        assert!(matches!(result, Err(LogbookError::DocumentNotFound { .. })));
    }

    #[test]
    fn test_invalid_dump_is_extraction_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"pages": "not a list"}}"#).unwrap();
        let result = ExtractedDocument::load(file.path());
        assert!(matches!(result, Err(LogbookError::Extraction { .. })));
    }

    #[test]
    fn test_in_memory_pages() {
        let mut pages = vec![Page::new(Vec::new(), "uno")];
        assert_eq!(pages.pages().unwrap().len(), 1);
    }
}
