//! playlist-manifest - Music folder to JSON playlist manifest
//!
//! A command-line utility that scans a flat music folder, reads each audio
//! file's tags, extracts embedded cover art beside it, and rewrites the
//! `playlist.json` a web player loads, carrying hand-entered copyright URLs
//! forward from the previous manifest.
//!
//! # Architecture
//!
//! - `config`: CLI argument parsing and runtime settings
//! - `discovery`: Flat folder scanning for recognized audio extensions
//! - `audio`: Tag, picture and duration access through lofty
//! - `extract`: Tag alias resolution, cover strategies, entry assembly
//! - `manifest`: Prior manifest loading, backup and JSON output
//! - `pipeline`: Sequential orchestration and progress reporting
//!
//! # Example
//!
//! ```no_run
//! use playlist_manifest::{config::Settings, pipeline};
//!
//! let settings = Settings::for_music_dir("./music");
//! let result = pipeline::run(&settings).expect("Run failed");
//! println!("{} new entries", result.stats.new);
//! ```

pub mod audio;
pub mod config;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod manifest;
pub mod pipeline;
pub mod types;

// Re-export key types at crate root
pub use error::{PlaylistError, Result};
pub use types::{EntryStatus, ExtractStats, PlaylistEntry};
