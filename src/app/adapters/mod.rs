//! Adapters between the extraction layer and the parsing pipeline

pub mod extracted_document;

pub use extracted_document::{DocumentSource, ExtractedDocument};
