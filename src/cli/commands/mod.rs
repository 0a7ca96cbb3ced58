//! Command implementations for the logbook extractor CLI
//!
//! Each command is implemented in its own module:
//! - `parse`: Batch parsing of logbook dumps into trip records
//! - `tables`: Table classification listing for one dump

pub mod parse;
pub mod shared;
pub mod tables;

pub use shared::ExtractionStats;

use crate::cli::args::Commands;

/// Dispatch to the handler of `command`
pub async fn run(command: Commands) -> anyhow::Result<ExtractionStats> {
    match command {
        Commands::Parse(parse_args) => parse::run_parse(parse_args).await,
        Commands::Tables(tables_args) => tables::run_tables(tables_args).await,
    }
}
