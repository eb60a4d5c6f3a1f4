//! Prior manifest loading
//!
//! The previous `playlist.json` is the only place hand-entered data lives, so
//! reading it must never abort a run: a missing, unreadable or malformed file
//! yields an empty library.

use crate::types::null_as_default;
use serde::Deserialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info, warn};

/// The part of a prior manifest entry that survives a rebuild
///
/// Every other field is regenerated from the audio file, so it is ignored
/// whatever its type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub src: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub copyright_url: String,
}

impl PriorEntry {
    pub fn new(src: impl Into<String>, copyright_url: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            copyright_url: copyright_url.into(),
        }
    }
}

/// Prior manifest entries keyed by `src`
#[derive(Debug, Clone, Default)]
pub struct Library {
    entries: HashMap<String, PriorEntry>,
}

impl Library {
    /// Index entries by `src`; the first entry for a given `src` wins
    pub fn from_entries(entries: impl IntoIterator<Item = PriorEntry>) -> Self {
        let mut map = HashMap::new();
        for (index, entry) in entries.into_iter().enumerate() {
            if entry.src.is_empty() {
                debug!("Ignoring prior entry #{} without src", index);
                continue;
            }
            match map.entry(entry.src.clone()) {
                Entry::Occupied(_) => {
                    warn!("Duplicate src in prior manifest, keeping the first: {}", entry.src);
                }
                Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
            }
        }
        Self { entries: map }
    }

    pub fn get(&self, src: &str) -> Option<&PriorEntry> {
        self.entries.get(src)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Load a prior manifest
///
/// Returns an empty library if the file doesn't exist or can't be parsed.
pub fn load_library(path: &Path) -> Library {
    if !path.exists() {
        info!("No existing library at {}, will create a new one", path.display());
        return Library::default();
    }

    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            warn!("Could not open existing library {}: {}", path.display(), e);
            return Library::default();
        }
    };

    let reader = BufReader::new(file);
    let values: Vec<serde_json::Value> = match serde_json::from_reader(reader) {
        Ok(values) => values,
        Err(e) => {
            warn!(
                "Could not parse existing library {}: {} (will create a new one)",
                path.display(),
                e
            );
            return Library::default();
        }
    };

    // A single odd entry only costs that entry
    let entries = values.into_iter().enumerate().filter_map(|(index, value)| {
        serde_json::from_value::<PriorEntry>(value)
            .map_err(|e| warn!("Ignoring prior entry #{}: {}", index, e))
            .ok()
    });

    let library = Library::from_entries(entries);

    info!(
        "Loaded existing library {} with {} entries",
        path.display(),
        library.len()
    );

    library
}
