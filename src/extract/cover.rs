//! Cover art extraction
//!
//! Strategies are tried in priority order and the first one that finds image
//! bytes wins. Each strategy only asks the media view about one capability.

use crate::audio::MediaView;
use crate::discovery::DiscoveredFile;
use crate::error::PlaylistError;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Prefix of ID3v2 attached-picture frame keys
pub const ATTACHED_PICTURE_PREFIX: &str = "APIC";

/// Sidecar extension for cover images
pub const COVER_EXTENSION: &str = "jpg";

/// One way of finding embedded cover bytes
pub trait CoverStrategy: Send + Sync {
    /// Image bytes if this strategy applies to the file
    fn extract<'a>(&self, media: &'a dyn MediaView) -> Option<&'a [u8]>;

    /// Get the name of this strategy (for logging)
    fn name(&self) -> &'static str;
}

/// Base64 picture blocks in Ogg comments
pub struct PictureBlockStrategy;

impl CoverStrategy for PictureBlockStrategy {
    fn extract<'a>(&self, media: &'a dyn MediaView) -> Option<&'a [u8]> {
        media.picture_blocks().first().map(Vec::as_slice)
    }

    fn name(&self) -> &'static str {
        "picture block"
    }
}

/// ID3v2 `APIC` frames
pub struct AttachedPictureStrategy;

impl CoverStrategy for AttachedPictureStrategy {
    fn extract<'a>(&self, media: &'a dyn MediaView) -> Option<&'a [u8]> {
        media
            .attached_pictures()
            .iter()
            .find(|frame| frame.key.starts_with(ATTACHED_PICTURE_PREFIX))
            .map(|frame| frame.data.as_slice())
    }

    fn name(&self) -> &'static str {
        "attached picture"
    }
}

/// MP4 `covr` atom
pub struct CoverAtomStrategy;

impl CoverStrategy for CoverAtomStrategy {
    fn extract<'a>(&self, media: &'a dyn MediaView) -> Option<&'a [u8]> {
        media.cover_atoms().first().map(Vec::as_slice)
    }

    fn name(&self) -> &'static str {
        "cover atom"
    }
}

/// Native picture list (FLAC)
pub struct PictureListStrategy;

impl CoverStrategy for PictureListStrategy {
    fn extract<'a>(&self, media: &'a dyn MediaView) -> Option<&'a [u8]> {
        media.picture_list().first().map(Vec::as_slice)
    }

    fn name(&self) -> &'static str {
        "picture list"
    }
}

/// All strategies in priority order
pub static COVER_STRATEGIES: &[&dyn CoverStrategy] = &[
    &PictureBlockStrategy,
    &AttachedPictureStrategy,
    &CoverAtomStrategy,
    &PictureListStrategy,
];

/// First cover found by the strategies, with the strategy's name
pub fn find_cover(media: &dyn MediaView) -> Option<(&'static str, &[u8])> {
    COVER_STRATEGIES.iter().find_map(|strategy| {
        strategy
            .extract(media)
            .filter(|bytes| !bytes.is_empty())
            .map(|bytes| (strategy.name(), bytes))
    })
}

/// What happened to a file's cover sidecar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverOutcome {
    /// Sidecar already on disk; left untouched
    Existing(PathBuf),
    /// Embedded image written to the sidecar path
    Extracted(PathBuf),
    /// No embedded image, or writing it failed
    NotFound,
    /// Extraction turned off
    Disabled,
}

/// Make sure `<stem>.jpg` exists beside the audio file if the file embeds one
///
/// Never overwrites an existing sidecar. Write failures are logged and
/// reported as `NotFound`.
pub fn ensure_cover(file: &DiscoveredFile, media: &dyn MediaView, enabled: bool) -> CoverOutcome {
    let cover_path = file.sidecar_path(COVER_EXTENSION);

    if cover_path.exists() {
        debug!("Cover already exists: {}", cover_path.display());
        return CoverOutcome::Existing(cover_path);
    }

    if !enabled {
        return CoverOutcome::Disabled;
    }

    let Some((strategy, bytes)) = find_cover(media) else {
        debug!("No cover art found in {}", file.file_name);
        return CoverOutcome::NotFound;
    };

    match std::fs::write(&cover_path, bytes) {
        Ok(()) => {
            debug!(
                "Extracted cover from {} ({}, {} bytes)",
                file.file_name,
                strategy,
                bytes.len()
            );
            CoverOutcome::Extracted(cover_path)
        }
        Err(e) => {
            let err = PlaylistError::CoverWrite {
                path: cover_path,
                reason: e.to_string(),
            };
            warn!("Could not extract cover from {}: {}", file.file_name, err);
            CoverOutcome::NotFound
        }
    }
}
