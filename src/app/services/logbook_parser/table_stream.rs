//! Table stream construction
//!
//! Flattens the per-page table lists of an extracted document into a single
//! ordered sequence tagged with page indices. Cross-page continuation is only
//! recoverable from order, so tables are never reordered or deduplicated.

use crate::app::models::{Page, RawTable};

/// A table together with the index of the page it was found on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamTable<'a> {
    pub page_index: usize,
    pub table: &'a RawTable,
}

/// Build the ordered table stream for a document
///
/// Tables without any rows carry no content and are left out.
pub fn build_table_stream(pages: &[Page]) -> Vec<StreamTable<'_>> {
    pages
        .iter()
        .enumerate()
        .flat_map(|(page_index, page)| {
            page.tables
                .iter()
                .filter(|table| !table.is_empty())
                .map(move |table| StreamTable { page_index, table })
        })
        .collect()
}

/// Concatenate all page texts, one page per block, for free-text extraction
pub fn full_text(pages: &[Page]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(&page.text);
        text.push('\n');
    }
    text
}
