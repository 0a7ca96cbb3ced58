use clap::Parser;
use logbook_extractor::LogbookError;
use logbook_extractor::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let shutdown_signal = async {
            if tokio::signal::ctrl_c().await.is_err() {
                // Without a handler, never resolve and let the command finish
                std::future::pending::<()>().await;
            }
        };

        // Dropping the command future abandons documents not yet started
        tokio::select! {
            result = commands::run(command) => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(LogbookError::processing_interrupted("Processing interrupted by user").into())
            }
        }
    });

    match result {
        Ok(_stats) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Logbook Extractor - Electronic Fishing Logbook Parser");
    println!("=====================================================");
    println!();
    println!("Turn extracted logbook (bitácora) pages into structured trip records");
    println!("with hauls, catches and an indicator species alert.");
    println!();
    println!("USAGE:");
    println!("    logbook-extractor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    parse       Parse logbook dumps into trip records (main command)");
    println!("    tables      Print how each table of a dump is classified");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Parse a directory of dumps into record files:");
    println!("    logbook-extractor parse dumps/ --output records/");
    println!();
    println!("    # Parse one dump to stdout with a custom species table:");
    println!("    logbook-extractor parse bitacora.json --species species.json --pretty");
    println!();
    println!("    # Inspect table classification:");
    println!("    logbook-extractor tables bitacora.json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    logbook-extractor <COMMAND> --help");
}
