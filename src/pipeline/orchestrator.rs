//! Pipeline orchestration
//!
//! Coordinates discovery, prior-manifest loading, extraction and writing.
//! Everything runs on the calling thread, one file at a time.

use super::progress::{ConsoleProgress, NoProgress, Progress};
use crate::audio::{LoftyReader, TagReader};
use crate::config::Settings;
use crate::discovery::{self, DiscoveredFile};
use crate::error::Result;
use crate::extract;
use crate::manifest::{self, WriteOutcome};
use crate::types::ExtractStats;
use std::time::Instant;
use tracing::{debug, info};

/// Pipeline result summary
#[derive(Debug)]
pub struct PipelineResult {
    /// Recognized audio files found in the music folder
    pub total_files: usize,
    pub stats: ExtractStats,
    pub outcome: WriteOutcome,
}

impl PipelineResult {
    fn nothing_written(total_files: usize) -> Self {
        Self {
            total_files,
            stats: ExtractStats::default(),
            outcome: WriteOutcome::Skipped,
        }
    }
}

/// Run the full pipeline with lofty and the configured progress sink
pub fn run(settings: &Settings) -> Result<PipelineResult> {
    let reader = LoftyReader::new();
    if settings.show_progress {
        run_with(settings, &reader, &ConsoleProgress::new())
    } else {
        run_with(settings, &reader, &NoProgress)
    }
}

/// Run the pipeline with an explicit tag reader and progress sink
pub fn run_with(
    settings: &Settings,
    reader: &dyn TagReader,
    progress: &dyn Progress,
) -> Result<PipelineResult> {
    let pipeline_start = Instant::now();

    // Phase 1: Discovery
    info!("Scanning {} for audio files...", settings.music_dir.display());
    let files = discovery::scan(&settings.music_dir)?;

    if files.is_empty() {
        return Ok(PipelineResult::nothing_written(0));
    }

    // Dry run mode - show files and exit
    if settings.dry_run {
        print_dry_run(&files, settings);
        return Ok(PipelineResult::nothing_written(files.len()));
    }

    // Phase 2: Prior manifest
    let library = manifest::load_library(&settings.library_path);
    debug!("{} prior entries available for preservation", library.len());

    // Phase 3: Extraction
    let extract_start = Instant::now();
    let (entries, stats) = extract::extract_all(&files, &library, reader, settings, progress);
    info!(
        "Extraction completed in {:.2}s",
        extract_start.elapsed().as_secs_f64()
    );

    // Phase 4: Write
    let outcome = manifest::write_manifest(&entries, &settings.manifest_path, settings.backup)?;

    info!(
        "Total pipeline time: {:.2}s",
        pipeline_start.elapsed().as_secs_f64()
    );

    Ok(PipelineResult {
        total_files: files.len(),
        stats,
        outcome,
    })
}

/// Dry run mode - list files that would be processed without reading tags
fn print_dry_run(files: &[DiscoveredFile], settings: &Settings) {
    println!();
    println!("=== DRY RUN MODE ===");
    println!();
    println!("{}/ ({} files)", settings.music_dir.display(), files.len());
    for file in files {
        let cover = if file.sidecar_path(extract::cover::COVER_EXTENSION).exists() {
            "cover"
        } else {
            "no cover"
        };
        let lyrics = if file.sidecar_path(extract::LYRICS_EXTENSION).exists() {
            "lyrics"
        } else {
            "no lyrics"
        };
        println!("  {} ({}, {})", file.file_name, cover, lyrics);
    }
    println!();
    println!("Would read library: {}", settings.library_path.display());
    println!("Would write:        {}", settings.manifest_path.display());
    if settings.backup && settings.manifest_path.exists() {
        println!(
            "Would back up to:   {}",
            manifest::backup_path(&settings.manifest_path, chrono::Local::now().naive_local()).display()
        );
    }
    println!();
}
