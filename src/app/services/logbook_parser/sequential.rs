//! Sequential table processing
//!
//! A single pass over the classified table stream. Page breaks can split a
//! haul across several tables with no repeated header, so attribution depends
//! on what came before: the processor keeps the haul in progress and decides
//! for each table whether it continues that haul, opens a new one, or belongs
//! to the trip-total summary.

use tracing::debug;

use crate::app::models::{CatchEntry, Haul, RawTable, TableCategory};

use super::classifier::classify_table;
use super::haul_tables::{
    SpeciesLayout, TableContext, apply_haul_table, apply_observations_table,
    apply_species_table, detect_haul_number, extract_species, start_haul,
};
use super::stats::{Diagnostic, ParseDiagnostics};
use super::table_stream::StreamTable;

/// Hauls and summary entries recovered from one table stream
#[derive(Debug, Clone, Default)]
pub struct SequentialOutput {
    /// Individual hauls in document order
    pub hauls: Vec<Haul>,

    /// Entries of the trip-total summary section
    pub summary_entries: Vec<CatchEntry>,

    /// Whether a summary section was present
    pub summary_seen: bool,
}

/// State machine attributing tables to hauls
#[derive(Debug)]
pub struct SequentialProcessor<'a> {
    ctx: TableContext<'a>,
    current_haul: Option<Haul>,
    output: SequentialOutput,
    haul_stream_started: bool,
    diagnostics: ParseDiagnostics,
}

impl<'a> SequentialProcessor<'a> {
    pub fn new(ctx: TableContext<'a>) -> Self {
        Self {
            ctx,
            current_haul: None,
            output: SequentialOutput::default(),
            haul_stream_started: false,
            diagnostics: ParseDiagnostics::new(),
        }
    }

    /// Classify one table and apply the matching transition
    pub fn process(&mut self, entry: StreamTable<'_>) {
        let category = classify_table(entry.table);
        self.diagnostics.record_table(category);
        debug!(
            "Page {}: {} table ({} rows)",
            entry.page_index + 1,
            category,
            entry.table.row_count()
        );

        let page = entry.page_index;
        let table = entry.table;

        match category {
            TableCategory::GeneralInfo => {}
            TableCategory::SummaryHeader => {
                self.output.summary_seen = true;
                self.extend_summary(table);
            }
            TableCategory::SpeciesContinuationData
                if self.output.summary_seen && !self.haul_stream_started =>
            {
                self.extend_summary(table);
            }
            TableCategory::HaulHeader => {
                self.haul_stream_started = true;
                self.on_haul_header(table, page);
            }
            TableCategory::HaulContinuation => {
                self.haul_stream_started = true;
                self.on_haul_continuation(table, page);
            }
            TableCategory::SpeciesStandalone | TableCategory::SpeciesContinuationData => {
                match self.current_haul.as_mut() {
                    Some(haul) => apply_species_table(haul, table, &self.ctx),
                    None => self.record_orphan(page, category),
                }
            }
            TableCategory::ObservationsOnly => match self.current_haul.as_mut() {
                Some(haul) => apply_observations_table(haul, table),
                None => self.record_orphan(page, category),
            },
            TableCategory::Unknown => {
                self.diagnostics.push(Diagnostic::UnknownTable {
                    page,
                    first_cell: table.first_cell().trim().to_string(),
                });
            }
        }
    }

    /// Seal the haul in progress and return everything recovered
    pub fn finish(mut self) -> (SequentialOutput, ParseDiagnostics) {
        self.seal_current();
        (self.output, self.diagnostics)
    }

    fn on_haul_header(&mut self, table: &RawTable, page: usize) {
        let number = detect_haul_number(table);

        if let Some(haul) = self.current_haul.as_mut() {
            if number == Some(haul.number) {
                debug!("Haul {} header repeated, merging", haul.number);
                self.diagnostics.push(Diagnostic::DuplicateHaulMerged {
                    page,
                    haul: haul.number,
                });
                apply_haul_table(haul, table, page, &self.ctx, &mut self.diagnostics);
                return;
            }
        }

        self.open_haul(table, page);
    }

    fn on_haul_continuation(&mut self, table: &RawTable, page: usize) {
        let number = detect_haul_number(table);
        let opens_new_haul = match &self.current_haul {
            Some(haul) => number.is_some_and(|n| n != haul.number),
            None => true,
        };

        if opens_new_haul {
            self.open_haul(table, page);
        } else if let Some(haul) = self.current_haul.as_mut() {
            apply_haul_table(haul, table, page, &self.ctx, &mut self.diagnostics);
        }
    }

    fn open_haul(&mut self, table: &RawTable, page: usize) {
        self.seal_current();
        let haul = start_haul(table, page, &self.ctx, &mut self.diagnostics);
        debug!("Opened haul {}", haul.number);
        self.current_haul = Some(haul);
    }

    fn seal_current(&mut self) {
        if let Some(haul) = self.current_haul.take() {
            debug!(
                "Sealed haul {} with {} catch entries",
                haul.number,
                haul.catches.len()
            );
            self.output.hauls.push(haul);
        }
    }

    fn extend_summary(&mut self, table: &RawTable) {
        let entries = extract_species(table, SpeciesLayout::PositionalFallback, &self.ctx);
        self.output.summary_entries.extend(entries);
    }

    fn record_orphan(&mut self, page: usize, category: TableCategory) {
        debug!("No haul in progress for {} table on page {}", category, page + 1);
        self.diagnostics
            .push(Diagnostic::OrphanTable { page, category });
    }
}

/// Run the state machine over a whole table stream
pub fn process_stream(
    stream: &[StreamTable<'_>],
    ctx: TableContext<'_>,
) -> (SequentialOutput, ParseDiagnostics) {
    let mut processor = SequentialProcessor::new(ctx);
    for entry in stream {
        processor.process(*entry);
    }
    processor.finish()
}
