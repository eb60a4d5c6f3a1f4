//! CLI argument parsing and configuration

use crate::error::{PlaylistError, Result};
use clap::Parser;
use std::path::PathBuf;

/// playlist-manifest - keep a web player's playlist.json in sync with a music folder
///
/// Reads title, artist and duration from each audio file's tags, extracts
/// embedded cover art next to the file, and rewrites the JSON manifest while
/// keeping hand-entered copyright URLs from the previous version.
#[derive(Parser, Debug)]
#[command(name = "playlist-manifest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Music folder to scan (flat; sub-folders are ignored)
    #[arg(short, long, value_name = "DIR", default_value = "./music")]
    pub music_dir: PathBuf,

    /// Playlist name; the manifest is written to <music-dir>/<NAME>.json
    #[arg(short, long, value_name = "NAME", default_value = "playlist")]
    pub playlist: String,

    /// Prior manifest to carry copyright URLs from (defaults to the output manifest)
    #[arg(short, long, value_name = "FILE")]
    pub library: Option<PathBuf>,

    /// Prefix for the src, cover and lrc paths written into the manifest
    #[arg(long, value_name = "PREFIX", default_value = "./music/")]
    pub src_prefix: String,

    /// Do not extract embedded cover art
    #[arg(long, default_value = "false")]
    pub no_covers: bool,

    /// Do not back up the existing manifest before overwriting it
    #[arg(long, default_value = "false")]
    pub no_backup: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress progress bar and non-error logs)
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Dry run - list files that would be processed without writing anything
    #[arg(long, default_value = "false")]
    pub dry_run: bool,
}

impl Cli {
    /// Path of the manifest this run writes
    pub fn manifest_path(&self) -> PathBuf {
        self.music_dir.join(format!("{}.json", self.playlist))
    }

    /// Get the effective prior-manifest path
    pub fn library_path(&self) -> PathBuf {
        self.library.clone().unwrap_or_else(|| self.manifest_path())
    }

    /// Reject playlist names that would escape the music folder
    pub fn validate(&self) -> Result<()> {
        let name = self.playlist.trim();
        if name.is_empty() {
            return Err(PlaylistError::ConfigError(
                "Playlist name must not be empty".to_string(),
            ));
        }
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(PlaylistError::ConfigError(format!(
                "Playlist name '{}' must be a plain name like 'playlist' or 'mygo'",
                name
            )));
        }
        Ok(())
    }

    /// Get the log filter directive based on verbosity flags
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
