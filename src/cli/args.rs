//! Command-line argument definitions for the logbook extractor
//!
//! This module defines the CLI interface using the clap derive API.

use crate::constants::MAX_PARALLEL_WORKERS;
use crate::{LogbookError, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the logbook extractor
///
/// Turns JSON dumps of extracted logbook pages into structured trip records.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "logbook-extractor",
    version,
    about = "Extract trip, haul and catch records from electronic fishing logbooks",
    long_about = "Reads logbook (bitácora) documents whose pages have already been split into \
                  tables and text, attributes every table to the right haul across page breaks, \
                  recovers the trip header and validates catch totals and the indicator species \
                  ratio. Structural surprises are reported as diagnostics, never as failures."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse logbook dumps into trip records (main command)
    Parse(ParseArgs),
    /// Print how each table of a dump is classified
    Tables(TablesArgs),
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Logbook page dumps, or directories searched recursively for them
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory receiving one `<name>.trip.json` record per document
    ///
    /// Records are printed to stdout as JSON lines when not specified.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Directory for trip record files (default: stdout)"
    )]
    pub output_dir: Option<PathBuf>,

    /// Path to an extractor configuration file (JSON)
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Species registry file (JSON) merged over the built-in table
    #[arg(
        short = 's',
        long = "species",
        value_name = "FILE",
        help = "Species registry file merged over the built-in table"
    )]
    pub species_file: Option<PathBuf>,

    /// Number of documents parsed concurrently
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        default_value_t = num_cpus::get().min(MAX_PARALLEL_WORKERS),
        help = "Number of documents parsed concurrently"
    )]
    pub workers: usize,

    /// Pretty-print the JSON records
    #[arg(long = "pretty", help = "Pretty-print JSON output")]
    pub pretty: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Format of the closing batch report
    #[arg(
        long = "report-format",
        value_enum,
        default_value = "human",
        help = "Format of the batch report"
    )]
    pub report_format: ReportFormat,
}

/// Arguments for the tables command
#[derive(Debug, Clone, Parser)]
pub struct TablesArgs {
    /// Logbook page dump to inspect
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Batch report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary
    Human,
    /// JSON summary for scripting
    Json,
}

impl ParseArgs {
    /// Validate the parse command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        for input in &self.inputs {
            if !input.exists() {
                return Err(LogbookError::configuration(format!(
                    "Input path does not exist: {}",
                    input.display()
                )));
            }
        }

        if self.workers == 0 {
            return Err(LogbookError::configuration(
                "Number of workers must be greater than 0".to_string(),
            ));
        }
        if self.workers > MAX_PARALLEL_WORKERS {
            return Err(LogbookError::configuration(format!(
                "Number of workers cannot exceed {}",
                MAX_PARALLEL_WORKERS
            )));
        }

        if let Some(output_dir) = &self.output_dir {
            if output_dir.exists() && !output_dir.is_dir() {
                return Err(LogbookError::configuration(format!(
                    "Output path is not a directory: {}",
                    output_dir.display()
                )));
            }
        }

        for file in [&self.config_file, &self.species_file].into_iter().flatten() {
            if !file.exists() {
                return Err(LogbookError::configuration(format!(
                    "File does not exist: {}",
                    file.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the log level from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Progress bars are shown unless quiet, and only when records go to files
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_dir.is_some()
    }
}

impl TablesArgs {
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse_args(inputs: Vec<PathBuf>) -> ParseArgs {
        ParseArgs {
            inputs,
            output_dir: None,
            config_file: None,
            species_file: None,
            workers: 4,
            pretty: false,
            verbose: 0,
            quiet: false,
            report_format: ReportFormat::Human,
        }
    }

    #[test]
    fn test_parse_args_validation() {
        let temp_dir = TempDir::new().unwrap();
        let args = parse_args(vec![temp_dir.path().to_path_buf()]);
        assert!(args.validate().is_ok());

        let mut invalid = args.clone();
        invalid.workers = 0;
        assert!(invalid.validate().is_err());

        let mut invalid = args.clone();
        invalid.workers = MAX_PARALLEL_WORKERS + 1;
        assert!(invalid.validate().is_err());

        let mut invalid = args.clone();
        invalid.inputs.push(PathBuf::from("/nonexistent/logbook.json"));
        assert!(invalid.validate().is_err());

        let mut invalid = args;
        invalid.species_file = Some(PathBuf::from("/nonexistent/species.json"));
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_log_levels() {
        let mut args = parse_args(Vec::new());
        assert_eq!(args.get_log_level(), "warn");
        args.verbose = 2;
        assert_eq!(args.get_log_level(), "debug");
        args.quiet = true;
        assert_eq!(args.get_log_level(), "error");
    }

    #[test]
    fn test_cli_parsing() {
        let args = Args::try_parse_from([
            "logbook-extractor",
            "parse",
            "a.json",
            "dumps/",
            "--output",
            "out",
            "-j",
            "2",
            "--pretty",
            "-vv",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Parse(parse)) => {
                assert_eq!(parse.inputs.len(), 2);
                assert_eq!(parse.output_dir, Some(PathBuf::from("out")));
                assert_eq!(parse.workers, 2);
                assert!(parse.pretty);
                assert_eq!(parse.verbose, 2);
                assert!(parse.show_progress());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_requires_input() {
        assert!(Args::try_parse_from(["logbook-extractor", "parse"]).is_err());
    }
}
