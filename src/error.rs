//! Error handling for logbook extraction.
//!
//! Only failures that originate outside the table-processing core are fatal:
//! the extraction layer, file access, malformed JSON inputs and configuration.
//! Structural surprises inside the tables are reported as diagnostics instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogbookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Extraction layer failed for document {document}: {reason}")]
    Extraction { document: String, reason: String },

    #[error("Document not found at path: {path}")]
    DocumentNotFound { path: PathBuf },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Species registry error: {message}")]
    Registry { message: String },

    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl LogbookError {
    /// Create an extraction-layer error for a named document
    pub fn extraction(document: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Extraction {
            document: document.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a species registry error
    pub fn registry(message: impl Into<String>) -> Self {
        Self::Registry {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LogbookError>;
