//! Unified error types for playlist-manifest
//!
//! Error strategy:
//! - Per-file errors (tag reading, cover writing): Recoverable, skip and continue
//! - Run errors (missing music folder, manifest write): Fatal, abort the run
//!
//! All errors include actionable suggestions where possible.

use std::path::PathBuf;
use thiserror::Error;

/// Audio extensions the scanner recognizes, for helpful error messages
pub const SUPPORTED_FORMATS: &str = "MP3, OPUS, OGG, FLAC, M4A, WAV";

/// Top-level error type for playlist-manifest operations
#[derive(Debug, Error)]
pub enum PlaylistError {
    // =========================================================================
    // Recoverable errors - skip file, continue run
    // =========================================================================
    #[error("Could not read tags from '{path}': {reason}\n  Tip: If the file plays in other apps, its container may be corrupted")]
    TagRead { path: PathBuf, reason: String },

    #[error("Could not write cover art to '{path}': {reason}")]
    CoverWrite { path: PathBuf, reason: String },

    // =========================================================================
    // Fatal errors - abort the run
    // =========================================================================
    #[error("Music folder '{0}' not found\n  Tip: Pass the folder with --music-dir, e.g. playlist-manifest -m ./music")]
    MusicDirNotFound(PathBuf),

    #[error("Cannot write manifest to '{path}': {reason}\n  Tip: Check write permissions for the music folder")]
    OutputError { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

/// Result type alias for playlist-manifest operations
pub type Result<T> = std::result::Result<T, PlaylistError>;

impl PlaylistError {
    /// Returns true if this error is recoverable (should skip file, continue run)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PlaylistError::TagRead { .. } | PlaylistError::CoverWrite { .. }
        )
    }

    /// Create a tag read error for a file that the tagging library rejected
    pub fn tag_read(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        PlaylistError::TagRead {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an output error, checking for common issues
    pub fn output_error(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        let reason = match err.kind() {
            std::io::ErrorKind::PermissionDenied => {
                format!("Permission denied. Check that you have write access to {}", path.display())
            }
            std::io::ErrorKind::NotFound => {
                format!("Directory does not exist: {}", path.parent().map(|p| p.display().to_string()).unwrap_or_default())
            }
            _ => err.to_string(),
        };
        PlaylistError::OutputError { path, reason }
    }
}
