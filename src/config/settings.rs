//! Runtime configuration settings

use std::path::PathBuf;

/// Runtime settings for the manifest pipeline
#[derive(Debug, Clone)]
pub struct Settings {
    /// Music folder to scan
    pub music_dir: PathBuf,
    /// Manifest written by this run
    pub manifest_path: PathBuf,
    /// Prior manifest that copyright URLs are carried from
    pub library_path: PathBuf,
    /// Prefix for src/cover/lrc paths in the manifest
    pub src_prefix: String,
    /// Extract embedded cover art
    pub extract_covers: bool,
    /// Back up the existing manifest before overwriting
    pub backup: bool,
    /// Show progress bar
    pub show_progress: bool,
    /// Dry run mode - list files without processing
    pub dry_run: bool,
}

impl Settings {
    /// Create settings from CLI arguments
    pub fn from_cli(cli: &super::cli::Cli) -> Self {
        Self {
            music_dir: cli.music_dir.clone(),
            manifest_path: cli.manifest_path(),
            library_path: cli.library_path(),
            src_prefix: cli.src_prefix.clone(),
            extract_covers: !cli.no_covers,
            backup: !cli.no_backup,
            show_progress: !cli.quiet,
            dry_run: cli.dry_run,
        }
    }

    /// Settings for a given music folder with its default manifest
    pub fn for_music_dir(music_dir: impl Into<PathBuf>) -> Self {
        let music_dir = music_dir.into();
        let manifest_path = music_dir.join("playlist.json");
        Self {
            library_path: manifest_path.clone(),
            manifest_path,
            music_dir,
            ..Self::default()
        }
    }

    /// Manifest-relative path for a file beside the audio, e.g. `./music/song.jpg`
    pub fn manifest_ref(&self, file_name: &str) -> String {
        format!("{}{}", self.src_prefix, file_name)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_dir: PathBuf::from("./music"),
            manifest_path: PathBuf::from("./music/playlist.json"),
            library_path: PathBuf::from("./music/playlist.json"),
            src_prefix: "./music/".to_string(),
            extract_covers: true,
            backup: true,
            show_progress: true,
            dry_run: false,
        }
    }
}
