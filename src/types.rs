//! Core data types for playlist-manifest
//!
//! These types represent the domain model and flow through the pipeline.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

// =============================================================================
// Manifest entries
// =============================================================================

/// Fallback artist when no artist tag is present
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// One song's record in the playlist manifest
///
/// Field order is the on-disk key order. Prior manifests may omit fields or
/// carry `null`; those deserialize to empty values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistEntry {
    /// Relative path to the audio file; the key across runs
    #[serde(default, deserialize_with = "null_as_default")]
    pub src: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artist: String,
    /// Relative path to the same-stem `.jpg`
    #[serde(default, deserialize_with = "null_as_default")]
    pub cover: String,
    /// Relative path to the same-stem `.lrc`, or empty
    #[serde(default, deserialize_with = "null_as_default")]
    pub lrc: String,
    /// Manually curated; carried forward between runs
    #[serde(default, deserialize_with = "null_as_default")]
    pub copyright_url: String,
    /// Seconds, rounded to 2 decimals; `null` when unknown
    #[serde(default)]
    pub duration: Option<f64>,
}

/// Treat an explicit `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// How an entry relates to the prior manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// `src` was not in the prior manifest
    New,
    /// `src` was known but had no copyright URL
    Updated,
    /// `src` was known and its copyright URL was carried forward
    Preserved,
}

impl EntryStatus {
    pub fn label(self) -> &'static str {
        match self {
            EntryStatus::New => "NEW",
            EntryStatus::Updated => "UPDATED",
            EntryStatus::Preserved => "PRESERVED",
        }
    }
}

/// Counters produced by one extraction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub new: usize,
    pub updated: usize,
    pub preserved: usize,
    /// Files whose tags could not be read at all
    pub skipped: usize,
}

impl ExtractStats {
    pub fn record(&mut self, status: EntryStatus) {
        match status {
            EntryStatus::New => self.new += 1,
            EntryStatus::Updated => self.updated += 1,
            EntryStatus::Preserved => self.preserved += 1,
        }
    }

    /// Number of entries produced
    pub fn processed(&self) -> usize {
        self.new + self.updated + self.preserved
    }
}

// =============================================================================
// Supported formats
// =============================================================================

/// Audio formats recognized by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Opus,
    Ogg,
    Flac,
    M4a,
    Wav,
}

impl AudioFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "mp3" => Some(AudioFormat::Mp3),
            "opus" => Some(AudioFormat::Opus),
            "ogg" => Some(AudioFormat::Ogg),
            "flac" => Some(AudioFormat::Flac),
            "m4a" => Some(AudioFormat::M4a),
            "wav" => Some(AudioFormat::Wav),
            _ => None,
        }
    }

    /// Check if a path has a supported extension
    pub fn is_supported_path(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .is_some()
    }
}
