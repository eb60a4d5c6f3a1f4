//! playlist-manifest CLI entry point

use clap::Parser;
use playlist_manifest::config::{Cli, Settings};
use playlist_manifest::manifest::WriteOutcome;
use playlist_manifest::pipeline::{self, PipelineResult};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(&cli);

    // Validate inputs
    if let Err(e) = cli.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    // Build settings from CLI
    let settings = Settings::from_cli(&cli);

    println!("{}", "=".repeat(60));
    println!("Music Metadata Extractor with Library Management");
    println!("{}", "=".repeat(60));

    // Run the pipeline
    match pipeline::run(&settings) {
        Ok(result) => {
            print_summary(&result, &settings);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_target(false)
        .init();
}

fn print_summary(result: &PipelineResult, settings: &Settings) {
    let WriteOutcome::Written { path, entries, backup } = &result.outcome else {
        if !settings.dry_run {
            println!();
            println!("No audio files found or processed!");
        }
        return;
    };

    println!();
    println!("{}", "=".repeat(60));
    println!("✓ Playlist updated successfully!");
    println!("  Output: {}", path.display());
    if let Some(backup) = backup {
        println!("  Backup: {}", backup.display());
    }
    println!("  Total songs: {}", entries);
    println!();
    println!("Statistics:");
    println!("  New entries: {}", result.stats.new);
    println!("  Updated entries: {}", result.stats.updated);
    println!("  Copyright URLs preserved: {}", result.stats.preserved);
    if result.stats.skipped > 0 {
        println!("  Skipped (unreadable): {}", result.stats.skipped);
    }
    println!();
    println!("Note: Copyright URLs have been preserved from existing library.");
    println!("      Add copyright URLs for new songs manually.");
    println!("{}", "=".repeat(60));
}
