//! Title, artist and duration resolution
//!
//! Each canonical field has an ordered list of format-native tag keys. The
//! first key the parsed file exposes wins; later aliases are never consulted
//! once an earlier one matched.

use crate::audio::MediaView;
use crate::types::UNKNOWN_ARTIST;

/// Canonical fields read from tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Artist,
}

/// `(format tag key, canonical field)` in probe order
pub const TAG_ALIASES: &[(&str, Field)] = &[
    ("title", Field::Title),
    ("TIT2", Field::Title),
    ("\u{a9}nam", Field::Title),
    ("TITLE", Field::Title),
    ("Title", Field::Title),
    ("INAM", Field::Title),
    ("NAME", Field::Title),
    ("artist", Field::Artist),
    ("TPE1", Field::Artist),
    ("\u{a9}ART", Field::Artist),
    ("ARTIST", Field::Artist),
    ("Artist", Field::Artist),
    ("IART", Field::Artist),
    ("AUTH", Field::Artist),
];

/// Fields resolved for one file
#[derive(Debug, Clone, PartialEq)]
pub struct TrackFields {
    pub title: String,
    pub artist: String,
    pub duration: Option<f64>,
}

/// First value of the first alias for `field` that the file exposes
pub fn lookup(media: &dyn MediaView, field: Field) -> Option<String> {
    let (key, _) = TAG_ALIASES
        .iter()
        .filter(|(_, f)| *f == field)
        .find(|(key, _)| media.has_tag(key))?;
    media.tag_values(key)?.first().cloned()
}

/// Resolve every field, falling back to the file stem and `Unknown Artist`
pub fn resolve(media: &dyn MediaView, stem: &str) -> TrackFields {
    TrackFields {
        title: lookup(media, Field::Title).unwrap_or_else(|| stem.to_string()),
        artist: lookup(media, Field::Artist).unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
        duration: media.duration_secs().map(round_secs),
    }
}

/// Round to two decimal places, ties to even
pub fn round_secs(secs: f64) -> f64 {
    (secs * 100.0).round_ties_even() / 100.0
}
