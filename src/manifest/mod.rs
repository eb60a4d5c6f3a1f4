//! Playlist manifest reading and writing

pub mod library;
pub mod writer;

pub use library::{load_library, Library, PriorEntry};
pub use writer::{backup_path, write_manifest, WriteOutcome};
