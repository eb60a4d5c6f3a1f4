//! Audio file tag access
//!
//! `media` defines the capability view the extractor consumes; `tags` fills it
//! from lofty.

pub mod media;
pub mod tags;

pub use media::{AttachedPicture, MediaSnapshot, MediaView, PictureStorage, TagReader};
pub use tags::LoftyReader;
