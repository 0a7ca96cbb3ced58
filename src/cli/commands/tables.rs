//! Tables command implementation
//!
//! Prints the category the classifier assigns to every table of a dump, in
//! stream order. Used to inspect documents whose records look wrong.

use super::shared::{ExtractionStats, setup_logging};
use crate::app::adapters::ExtractedDocument;
use crate::app::models::TableCategory;
use crate::app::services::logbook_parser::{ParseDiagnostics, build_table_stream, classify_table};
use crate::cli::args::TablesArgs;
use anyhow::Context;
use colored::*;
use tracing::info;

/// Maximum characters of the first cell shown per table
const FIRST_CELL_PREVIEW: usize = 40;

pub async fn run_tables(args: TablesArgs) -> anyhow::Result<ExtractionStats> {
    setup_logging(args.get_log_level(), false)?;

    let document = ExtractedDocument::load(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    let stream = build_table_stream(&document.pages);
    info!(
        "{}: {} pages, {} tables",
        args.input.display(),
        document.pages.len(),
        stream.len()
    );

    let mut counts = ParseDiagnostics::new();
    println!(
        "{}",
        format!("{:>4} {:>4} {:>9}  {:<26} {}", "page", "#", "rows×cols", "category", "first cell")
            .bold()
    );

    for (index, entry) in stream.iter().enumerate() {
        let category = classify_table(entry.table);
        counts.record_table(category);

        let label = format!("{:<26}", category.as_str());
        let label = match category {
            TableCategory::Unknown => label.bright_red(),
            TableCategory::GeneralInfo | TableCategory::SummaryHeader => label.bright_yellow(),
            TableCategory::HaulHeader | TableCategory::HaulContinuation => label.bright_green(),
            _ => label.bright_cyan(),
        };

        let preview: String = entry.table.first_cell().chars().take(FIRST_CELL_PREVIEW).collect();
        println!(
            "{:>4} {:>4} {:>9}  {} {}",
            entry.page_index + 1,
            index + 1,
            format!("{}×{}", entry.table.row_count(), entry.table.column_count()),
            label,
            preview.replace('\n', " ")
        );
    }

    println!();
    for (category, count) in &counts.category_counts {
        println!("  {:<26} {}", category.as_str(), count);
    }
    println!(
        "  {} {:.1}%",
        "recognized:".bright_cyan(),
        counts.recognition_rate()
    );

    Ok(ExtractionStats {
        documents_processed: 1,
        ..Default::default()
    })
}
