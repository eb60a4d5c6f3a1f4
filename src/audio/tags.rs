//! Tag reading using lofty
//!
//! Converts lofty's unified tag model back into format-native keys and groups
//! embedded pictures by how the container stores them. Lofty already decodes
//! Ogg `METADATA_BLOCK_PICTURE` comments and FLAC picture blocks, so every
//! picture arrives here as raw image bytes.

use super::media::{MediaSnapshot, PictureStorage, TagReader};
use crate::error::{PlaylistError, Result};
use lofty::file::{AudioFile, FileType, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::{ItemKey, TagType};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, trace};

/// `TagReader` backed by lofty
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyReader;

impl LoftyReader {
    pub fn new() -> Self {
        Self
    }
}

impl TagReader for LoftyReader {
    fn read(&self, path: &Path) -> Result<MediaSnapshot> {
        let tagged_file = Probe::open(path)
            .map_err(|e| PlaylistError::tag_read(path, e.to_string()))?
            .read()
            .map_err(|e| PlaylistError::tag_read(path, e.to_string()))?;

        let file_type = tagged_file.file_type();
        let mut media = MediaSnapshot::new();
        media.set_duration(known_duration(tagged_file.properties().duration()));

        for tag in tagged_file.tags() {
            let tag_type = tag.tag_type();

            for item in tag.items() {
                let (Some(key), Some(text)) = (native_key(tag_type, item.key()), item.value().text())
                else {
                    continue;
                };
                trace!("{}: {} = {}", path.display(), key, text);
                media.push_tag(key, text);
            }

            let storage = picture_storage(file_type, tag_type);
            for picture in tag.pictures() {
                let key = match storage {
                    PictureStorage::AttachedFrame => {
                        format!("APIC:{}", picture.description().unwrap_or_default())
                    }
                    PictureStorage::CoverAtom => "covr".to_string(),
                    PictureStorage::PictureBlock => "METADATA_BLOCK_PICTURE".to_string(),
                    PictureStorage::PictureList => "PICTURE".to_string(),
                };
                media.push_picture(storage, key, picture.data().to_vec());
            }
        }

        debug!(
            "Read {} tag(s) from {} ({:?})",
            tagged_file.tags().len(),
            path.display(),
            file_type
        );

        Ok(media)
    }

    fn name(&self) -> &'static str {
        "lofty"
    }
}

/// A zero length means the container did not report one
fn known_duration(duration: Duration) -> Option<f64> {
    if duration.is_zero() {
        None
    } else {
        Some(duration.as_secs_f64())
    }
}

/// Format-native key for the items the extractor probes
fn native_key(tag_type: TagType, key: &ItemKey) -> Option<&'static str> {
    let native = match (tag_type, key) {
        (TagType::Id3v2 | TagType::Id3v1, ItemKey::TrackTitle) => "TIT2",
        (TagType::Id3v2 | TagType::Id3v1, ItemKey::TrackArtist) => "TPE1",
        (TagType::Mp4Ilst, ItemKey::TrackTitle) => "\u{a9}nam",
        (TagType::Mp4Ilst, ItemKey::TrackArtist) => "\u{a9}ART",
        (TagType::VorbisComments, ItemKey::TrackTitle) => "TITLE",
        (TagType::VorbisComments, ItemKey::TrackArtist) => "ARTIST",
        (TagType::Ape, ItemKey::TrackTitle) => "Title",
        (TagType::Ape, ItemKey::TrackArtist) => "Artist",
        (TagType::RiffInfo, ItemKey::TrackTitle) => "INAM",
        (TagType::RiffInfo, ItemKey::TrackArtist) => "IART",
        (TagType::AiffText, ItemKey::TrackTitle) => "NAME",
        (TagType::AiffText, ItemKey::TrackArtist) => "AUTH",
        _ => return None,
    };
    Some(native)
}

/// Where a tag's pictures came from in the container
fn picture_storage(file_type: FileType, tag_type: TagType) -> PictureStorage {
    match tag_type {
        TagType::Id3v2 => PictureStorage::AttachedFrame,
        TagType::Mp4Ilst => PictureStorage::CoverAtom,
        TagType::VorbisComments if file_type != FileType::Flac => PictureStorage::PictureBlock,
        _ => PictureStorage::PictureList,
    }
}
