//! Metadata extraction
//!
//! Builds one `PlaylistEntry` per readable audio file: tag fields, cover
//! sidecar, lyrics sidecar, and the copyright URL carried from the prior
//! manifest.

pub mod cover;
pub mod fields;

pub use cover::{ensure_cover, find_cover, CoverOutcome, CoverStrategy, COVER_STRATEGIES};
pub use fields::{resolve, Field, TrackFields, TAG_ALIASES};

use crate::audio::{MediaView, TagReader};
use crate::config::Settings;
use crate::discovery::DiscoveredFile;
use crate::manifest::Library;
use crate::pipeline::Progress;
use crate::types::{EntryStatus, ExtractStats, PlaylistEntry};
use tracing::{debug, error, info, warn};

/// Sidecar extension for lyrics
pub const LYRICS_EXTENSION: &str = "lrc";

/// Result of extracting one file
#[derive(Debug, Clone)]
pub struct ExtractedEntry {
    pub entry: PlaylistEntry,
    pub status: EntryStatus,
    pub cover: CoverOutcome,
}

/// Extract every file in order, skipping files whose tags cannot be read
pub fn extract_all(
    files: &[DiscoveredFile],
    library: &Library,
    reader: &dyn TagReader,
    settings: &Settings,
    progress: &dyn Progress,
) -> (Vec<PlaylistEntry>, ExtractStats) {
    let mut entries = Vec::with_capacity(files.len());
    let mut stats = ExtractStats::default();

    progress.start(files.len());
    debug!("Reading tags with {}", reader.name());

    for file in files {
        progress.file_started(&file.file_name);

        let media = match reader.read(&file.path) {
            Ok(media) => media,
            Err(e) => {
                if e.is_recoverable() {
                    warn!("Skipping {}: {}", file.file_name, e);
                } else {
                    error!("Skipping {}: {}", file.file_name, e);
                }
                stats.skipped += 1;
                progress.file_done(&file.file_name, None);
                continue;
            }
        };

        let extracted = extract_file(file, &media, library, settings);
        match &extracted.cover {
            CoverOutcome::Extracted(path) => {
                info!("Cover written for {} ({:?}): {}", file.file_name, file.format, path.display())
            }
            CoverOutcome::Existing(_) | CoverOutcome::NotFound | CoverOutcome::Disabled => {
                debug!("Cover for {}: {:?}", file.file_name, extracted.cover)
            }
        }
        stats.record(extracted.status);
        progress.file_done(&file.file_name, Some(extracted.status));
        entries.push(extracted.entry);
    }

    progress.finish();

    info!(
        "Extracted {} entries ({} new, {} updated, {} preserved, {} skipped)",
        stats.processed(),
        stats.new,
        stats.updated,
        stats.preserved,
        stats.skipped
    );

    (entries, stats)
}

/// Build the entry for one parsed file
pub fn extract_file(
    file: &DiscoveredFile,
    media: &dyn MediaView,
    library: &Library,
    settings: &Settings,
) -> ExtractedEntry {
    let fields = resolve(media, &file.stem);
    let cover = ensure_cover(file, media, settings.extract_covers);
    let src = settings.manifest_ref(&file.file_name);

    let (copyright_url, status) = match library.get(&src) {
        Some(prior) if !prior.copyright_url.is_empty() => {
            debug!("Copyright URL preserved for {}: {}", file.file_name, prior.copyright_url);
            (prior.copyright_url.clone(), EntryStatus::Preserved)
        }
        Some(_) => (String::new(), EntryStatus::Updated),
        None => (String::new(), EntryStatus::New),
    };

    let entry = PlaylistEntry {
        src,
        title: fields.title,
        artist: fields.artist,
        cover: settings.manifest_ref(&file.sidecar_name(cover::COVER_EXTENSION)),
        lrc: lyrics_ref(file, settings),
        copyright_url,
        duration: fields.duration,
    };

    info!(
        "[{}] {} - {} ({})",
        status.label(),
        entry.artist,
        entry.title,
        entry
            .duration
            .map(|d| format!("{:.2}s", d))
            .unwrap_or_else(|| "duration unknown".to_string())
    );

    ExtractedEntry {
        entry,
        status,
        cover,
    }
}

/// Manifest path of the lyrics sidecar, or empty if there is none
fn lyrics_ref(file: &DiscoveredFile, settings: &Settings) -> String {
    if file.sidecar_path(LYRICS_EXTENSION).is_file() {
        settings.manifest_ref(&file.sidecar_name(LYRICS_EXTENSION))
    } else {
        String::new()
    }
}
