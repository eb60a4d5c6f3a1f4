//! Manifest writing
//!
//! Backs up the current manifest, then replaces it through a temp file and
//! rename so an interrupted run never leaves a truncated manifest behind.

use crate::error::{PlaylistError, Result};
use crate::types::PlaylistEntry;
use chrono::{Local, NaiveDateTime};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Timestamp format of backup file names
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// What `write_manifest` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// No entries; nothing was touched
    Skipped,
    Written {
        path: PathBuf,
        entries: usize,
        backup: Option<PathBuf>,
    },
}

/// Write entries as a pretty-printed JSON array
///
/// With an empty entry list nothing is written and no backup is made.
pub fn write_manifest(
    entries: &[PlaylistEntry],
    manifest_path: &Path,
    backup: bool,
) -> Result<WriteOutcome> {
    if entries.is_empty() {
        warn!("No entries to write, leaving {} untouched", manifest_path.display());
        return Ok(WriteOutcome::Skipped);
    }

    let backup = if backup {
        backup_manifest(manifest_path, Local::now().naive_local())
    } else {
        None
    };

    // Write to temp file in same directory (ensures same filesystem for atomic rename)
    let temp_path = manifest_path.with_extension("json.tmp");

    let file = File::create(&temp_path).map_err(|e| PlaylistError::output_error(manifest_path, e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, entries)
        .map_err(std::io::Error::from)
        .and_then(|()| writer.flush())
        .map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            PlaylistError::output_error(manifest_path, e)
        })?;
    drop(writer);

    std::fs::rename(&temp_path, manifest_path).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        PlaylistError::OutputError {
            path: manifest_path.to_path_buf(),
            reason: format!("Failed to finalize file: {}", e),
        }
    })?;

    info!("Wrote {} entries to {}", entries.len(), manifest_path.display());

    Ok(WriteOutcome::Written {
        path: manifest_path.to_path_buf(),
        entries: entries.len(),
        backup,
    })
}

/// Copy an existing, non-empty manifest to its timestamped backup path
///
/// Failures are logged and reported as no backup.
fn backup_manifest(manifest_path: &Path, now: NaiveDateTime) -> Option<PathBuf> {
    let size = match std::fs::metadata(manifest_path) {
        Ok(meta) => meta.len(),
        Err(_) => {
            debug!("No existing manifest at {}, nothing to back up", manifest_path.display());
            return None;
        }
    };
    if size == 0 {
        debug!("Existing manifest {} is empty, not backing up", manifest_path.display());
        return None;
    }

    let backup_path = backup_path(manifest_path, now);
    match std::fs::copy(manifest_path, &backup_path) {
        Ok(_) => {
            info!("Backup created: {}", backup_path.display());
            Some(backup_path)
        }
        Err(e) => {
            warn!("Could not create backup {}: {}", backup_path.display(), e);
            None
        }
    }
}

/// `<dir>/<stem>_backup_<YYYYMMDDHHMMSS>.json`
pub fn backup_path(manifest_path: &Path, now: NaiveDateTime) -> PathBuf {
    let stem = manifest_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("playlist");
    manifest_path.with_file_name(format!(
        "{}_backup_{}.json",
        stem,
        now.format(BACKUP_TIMESTAMP_FORMAT)
    ))
}
