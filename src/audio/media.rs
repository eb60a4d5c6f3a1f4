//! Parsed media view
//!
//! The extractor never sees a concrete container type. It asks a `MediaView`
//! what the file exposes: tag values under a format-native key, the embedded
//! pictures grouped by how the container stores them, and the duration.

use crate::error::Result;
use std::path::Path;

/// An ID3v2 attached-picture frame, keyed like `APIC:<description>`
#[derive(Debug, Clone, PartialEq)]
pub struct AttachedPicture {
    pub key: String,
    pub data: Vec<u8>,
}

/// How a container stores its embedded pictures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureStorage {
    /// Base64 `METADATA_BLOCK_PICTURE` comments (Ogg Opus/Vorbis)
    PictureBlock,
    /// ID3v2 `APIC` frames
    AttachedFrame,
    /// MP4 `covr` atom
    CoverAtom,
    /// Native picture list (FLAC metadata blocks)
    PictureList,
}

/// Capability view over one parsed audio file
pub trait MediaView {
    /// Values stored under a format-native tag key (`TIT2`, `©nam`, `TITLE`, ...)
    fn tag_values(&self, key: &str) -> Option<&[String]>;

    /// Container length in seconds, if known
    fn duration_secs(&self) -> Option<f64>;

    /// Image bytes decoded from picture blocks
    fn picture_blocks(&self) -> &[Vec<u8>];

    /// Attached-picture frames in file order
    fn attached_pictures(&self) -> &[AttachedPicture];

    /// Elements of the cover atom
    fn cover_atoms(&self) -> &[Vec<u8>];

    /// Entries of the native picture list
    fn picture_list(&self) -> &[Vec<u8>];

    /// Does the file expose any value under `key`?
    fn has_tag(&self, key: &str) -> bool {
        self.tag_values(key).is_some_and(|v| !v.is_empty())
    }
}

/// Owned snapshot of everything the extractor reads from a file
#[derive(Debug, Clone, Default)]
pub struct MediaSnapshot {
    tags: Vec<(String, Vec<String>)>,
    duration: Option<f64>,
    picture_blocks: Vec<Vec<u8>>,
    attached: Vec<AttachedPicture>,
    cover_atoms: Vec<Vec<u8>>,
    picture_list: Vec<Vec<u8>>,
}

impl MediaSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `key`; repeated keys build a sequence
    pub fn push_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.tags.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.tags.push((key, vec![value])),
        }
    }

    pub fn set_duration(&mut self, secs: Option<f64>) {
        self.duration = secs;
    }

    pub fn push_picture(&mut self, storage: PictureStorage, key: impl Into<String>, data: Vec<u8>) {
        match storage {
            PictureStorage::PictureBlock => self.picture_blocks.push(data),
            PictureStorage::AttachedFrame => self.attached.push(AttachedPicture {
                key: key.into(),
                data,
            }),
            PictureStorage::CoverAtom => self.cover_atoms.push(data),
            PictureStorage::PictureList => self.picture_list.push(data),
        }
    }

    /// Builder form of `push_tag`
    pub fn with_tag(mut self, key: &str, value: &str) -> Self {
        self.push_tag(key, value);
        self
    }

    /// Builder form of `push_picture`
    pub fn with_picture(mut self, storage: PictureStorage, key: &str, data: &[u8]) -> Self {
        self.push_picture(storage, key, data.to_vec());
        self
    }

    /// Builder form of `set_duration`
    pub fn with_duration(mut self, secs: f64) -> Self {
        self.duration = Some(secs);
        self
    }
}

impl MediaView for MediaSnapshot {
    fn tag_values(&self, key: &str) -> Option<&[String]> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
    }

    fn duration_secs(&self) -> Option<f64> {
        self.duration
    }

    fn picture_blocks(&self) -> &[Vec<u8>] {
        &self.picture_blocks
    }

    fn attached_pictures(&self) -> &[AttachedPicture] {
        &self.attached
    }

    fn cover_atoms(&self) -> &[Vec<u8>] {
        &self.cover_atoms
    }

    fn picture_list(&self) -> &[Vec<u8>] {
        &self.picture_list
    }
}

/// Tag reading backend
pub trait TagReader: Send + Sync {
    /// Parse a file's tags, pictures and duration
    ///
    /// An error means the file yielded no usable handle and should be skipped.
    fn read(&self, path: &Path) -> Result<MediaSnapshot>;

    /// Get the name of this reader (for logging)
    fn name(&self) -> &'static str;
}
