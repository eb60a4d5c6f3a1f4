//! File discovery and scanning

use crate::error::{PlaylistError, Result, SUPPORTED_FORMATS};
use crate::types::AudioFormat;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Discovered audio file with its sidecar naming parts
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub format: AudioFormat,
    /// File name including extension, e.g. `song.mp3`
    pub file_name: String,
    /// File name without extension, e.g. `song`
    pub stem: String,
}

impl DiscoveredFile {
    /// Path of a same-stem sidecar beside the audio file, e.g. `song.jpg`
    pub fn sidecar_path(&self, ext: &str) -> PathBuf {
        self.path.with_file_name(self.sidecar_name(ext))
    }

    pub fn sidecar_name(&self, ext: &str) -> String {
        format!("{}.{}", self.stem, ext)
    }
}

/// Scan a music folder for audio files
///
/// Only the folder itself is searched. Results are sorted by file name so the
/// manifest order is stable across runs.
pub fn scan(music_dir: &Path) -> Result<Vec<DiscoveredFile>> {
    if !music_dir.is_dir() {
        return Err(PlaylistError::MusicDirNotFound(music_dir.to_path_buf()));
    }

    let mut files: Vec<DiscoveredFile> = WalkDir::new(music_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter_map(|e| {
            let file = try_discover_file(e.path());
            if let Some(ref f) = file {
                debug!("Discovered: {} ({:?})", f.file_name, f.format);
            }
            file
        })
        .collect();

    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    info!("Found {} audio file(s) in {}", files.len(), music_dir.display());

    if files.is_empty() {
        warn!(
            "No supported audio files found in {} (looking for {})",
            music_dir.display(),
            SUPPORTED_FORMATS
        );
    }

    Ok(files)
}

/// Try to create a DiscoveredFile if the path is a supported audio format
fn try_discover_file(path: &Path) -> Option<DiscoveredFile> {
    let ext = path.extension()?.to_str()?;
    let format = AudioFormat::from_extension(ext)?;

    // Manifest paths are JSON strings, so the name must be valid UTF-8
    let (Some(file_name), Some(stem)) = (
        path.file_name().and_then(|n| n.to_str()),
        path.file_stem().and_then(|s| s.to_str()),
    ) else {
        warn!("Skipping file with a non-UTF-8 name: {}", path.display());
        return None;
    };

    Some(DiscoveredFile {
        path: path.to_path_buf(),
        format,
        file_name: file_name.to_string(),
        stem: stem.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["b.flac", "a.mp3", "notes.txt", "a.jpg", "a.lrc", "C.OPUS"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let files = scan(dir.path()).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, ["C.OPUS", "a.mp3", "b.flac"]);
        assert_eq!(files[0].format, AudioFormat::Opus);
    }

    #[test]
    fn test_scan_is_not_recursive() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/deep.mp3"), b"x").unwrap();
        fs::write(dir.path().join("top.wav"), b"x").unwrap();

        let files = scan(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].stem, "top");
    }

    #[test]
    fn test_scan_missing_dir() {
        let dir = TempDir::new().unwrap();
        let err = scan(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, PlaylistError::MusicDirNotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(OsStr::from_bytes(b"bad\xff.mp3")), b"x").unwrap();
        fs::write(dir.path().join("good.mp3"), b"x").unwrap();

        let files = scan(dir.path()).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, ["good.mp3"]);
    }

    #[test]
    fn test_sidecar_paths() {
        let file = try_discover_file(Path::new("/music/My Song.m4a")).unwrap();
        assert_eq!(file.sidecar_path("jpg"), PathBuf::from("/music/My Song.jpg"));
        assert_eq!(file.sidecar_name("lrc"), "My Song.lrc");
    }
}
