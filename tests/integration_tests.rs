//! Integration tests for the playlist-manifest pipeline
//!
//! These tests run the full pipeline over synthesized WAV files and check the
//! manifest written to disk.

use lofty::config::WriteOptions;
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::tag::{ItemKey, Tag, TagExt, TagType};
use playlist_manifest::manifest::WriteOutcome;
use playlist_manifest::{config::Settings, pipeline, PlaylistError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Minimal JPEG-looking payload for embedded cover art
const FAKE_JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0xFF, 0xD9];

/// Generate a silent mono 16-bit WAV file
fn generate_wav(path: &Path, duration_secs: f32, sample_rate: u32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec).expect("Failed to create WAV file");
    let num_samples = (duration_secs * sample_rate as f32) as usize;
    for _ in 0..num_samples {
        writer.write_sample(0i16).expect("Failed to write sample");
    }
    writer.finalize().expect("Failed to finalize WAV");
}

/// Write a frameless FLAC stream: the marker plus a STREAMINFO block
///
/// Lofty reads the length from STREAMINFO alone, so no audio frames are needed.
fn generate_flac(path: &Path, duration_secs: u64, sample_rate: u32) {
    let total_samples = duration_secs * u64::from(sample_rate);
    // 20-bit sample rate, 3-bit channels-1 (mono), 5-bit bits-1 (16), 36-bit total samples
    let packed = (u64::from(sample_rate) << 44) | (15u64 << 36) | total_samples;

    let mut bytes = b"fLaC".to_vec();
    bytes.extend_from_slice(&[0x80, 0x00, 0x00, 34]);
    bytes.extend_from_slice(&4096u16.to_be_bytes());
    bytes.extend_from_slice(&4096u16.to_be_bytes());
    bytes.extend_from_slice(&[0; 6]);
    bytes.extend_from_slice(&packed.to_be_bytes());
    bytes.extend_from_slice(&[0; 16]);
    fs::write(path, bytes).expect("Failed to write FLAC file");
}

/// Embed an ID3v2 tag with title, artist and optionally a front cover
fn tag_wav(path: &Path, title: &str, artist: &str, cover: Option<&[u8]>) {
    tag_file(path, TagType::Id3v2, title, artist, cover);
}

/// Embed a tag of the given type with title, artist and optionally a front cover
fn tag_file(path: &Path, tag_type: TagType, title: &str, artist: &str, cover: Option<&[u8]>) {
    let mut tag = Tag::new(tag_type);
    tag.insert_text(ItemKey::TrackTitle, title.to_string());
    tag.insert_text(ItemKey::TrackArtist, artist.to_string());
    if let Some(bytes) = cover {
        tag.push_picture(Picture::new_unchecked(
            PictureType::CoverFront,
            Some(MimeType::Jpeg),
            None,
            bytes.to_vec(),
        ));
    }
    tag.save_to_path(path, WriteOptions::default())
        .expect("Failed to write tag");
}

/// Create test settings with the progress bar disabled
fn create_test_settings(music_dir: &Path) -> Settings {
    Settings {
        show_progress: false,
        ..Settings::for_music_dir(music_dir)
    }
}

fn read_manifest(music_dir: &Path) -> Vec<serde_json::Value> {
    let content =
        fs::read_to_string(music_dir.join("playlist.json")).expect("Failed to read manifest");
    serde_json::from_str(&content).expect("Manifest should be a JSON array")
}

fn backup_count(music_dir: &Path) -> usize {
    fs::read_dir(music_dir)
        .unwrap()
        .filter(|e| {
            e.as_ref()
                .unwrap()
                .file_name()
                .to_string_lossy()
                .starts_with("playlist_backup_")
        })
        .count()
}

#[test]
fn test_untagged_files_fall_back_to_filename() {
    let music = TempDir::new().expect("Failed to create temp dir");
    generate_wav(&music.path().join("b_second.wav"), 2.0, 44100);
    generate_wav(&music.path().join("a_first.wav"), 1.0, 44100);
    fs::write(music.path().join("a_first.lrc"), "[00:00.00]la").unwrap();

    let settings = create_test_settings(music.path());
    let result = pipeline::run(&settings).expect("Pipeline should succeed");

    assert_eq!(result.total_files, 2);
    assert_eq!(result.stats.new, 2);
    assert_eq!(result.stats.skipped, 0);

    let manifest = read_manifest(music.path());
    assert_eq!(manifest.len(), 2);

    let first = &manifest[0];
    assert_eq!(first["src"], "./music/a_first.wav");
    assert_eq!(first["title"], "a_first");
    assert_eq!(first["artist"], "Unknown Artist");
    assert_eq!(first["cover"], "./music/a_first.jpg");
    assert_eq!(first["lrc"], "./music/a_first.lrc");
    assert_eq!(first["copyrightUrl"], "");

    let second = &manifest[1];
    assert_eq!(second["lrc"], "");
    let duration = second["duration"].as_f64().expect("duration should be a number");
    assert!((duration - 2.0).abs() < 0.01, "duration {} should be ~2s", duration);

    // No embedded art, so no cover file is created
    assert!(!music.path().join("a_first.jpg").exists());
}

#[test]
fn test_id3_tags_and_cover_are_extracted() {
    let music = TempDir::new().expect("Failed to create temp dir");
    let song = music.path().join("haruhikage.wav");
    generate_wav(&song, 1.0, 44100);
    tag_wav(&song, "春日影", "MyGO!!!!!", Some(FAKE_JPEG));

    let settings = create_test_settings(music.path());
    pipeline::run(&settings).expect("Pipeline should succeed");

    let manifest = read_manifest(music.path());
    assert_eq!(manifest[0]["title"], "春日影");
    assert_eq!(manifest[0]["artist"], "MyGO!!!!!");
    assert_eq!(
        fs::read(music.path().join("haruhikage.jpg")).unwrap(),
        FAKE_JPEG
    );

    // Non-ASCII is written literally, not escaped
    let raw = fs::read_to_string(music.path().join("playlist.json")).unwrap();
    assert!(raw.contains("春日影"));
    assert!(!raw.contains("\\u"));
}

#[test]
fn test_existing_cover_is_not_overwritten() {
    let music = TempDir::new().expect("Failed to create temp dir");
    let song = music.path().join("song.wav");
    generate_wav(&song, 1.0, 44100);
    tag_wav(&song, "Song", "Band", Some(FAKE_JPEG));
    fs::write(music.path().join("song.jpg"), b"hand-picked cover").unwrap();

    let settings = create_test_settings(music.path());
    pipeline::run(&settings).expect("Pipeline should succeed");

    assert_eq!(
        fs::read(music.path().join("song.jpg")).unwrap(),
        b"hand-picked cover"
    );
}

#[test]
fn test_copyright_url_is_preserved() {
    let music = TempDir::new().expect("Failed to create temp dir");
    generate_wav(&music.path().join("song.wav"), 1.0, 44100);
    generate_wav(&music.path().join("other.wav"), 1.0, 44100);
    generate_wav(&music.path().join("fresh.wav"), 1.0, 44100);
    fs::write(
        music.path().join("playlist.json"),
        r#"[
  {"src": "./music/song.wav", "title": "Old title", "copyrightUrl": "http://x"},
  {"src": "./music/other.wav", "copyrightUrl": ""},
  {"src": "./music/gone.wav", "copyrightUrl": "http://gone"}
]"#,
    )
    .unwrap();

    let settings = create_test_settings(music.path());
    let result = pipeline::run(&settings).expect("Pipeline should succeed");

    assert_eq!(result.stats.preserved, 1);
    assert_eq!(result.stats.updated, 1);
    assert_eq!(result.stats.new, 1);

    let manifest = read_manifest(music.path());
    let song = manifest
        .iter()
        .find(|e| e["src"] == "./music/song.wav")
        .expect("song entry");
    assert_eq!(song["copyrightUrl"], "http://x");
    // Everything except the copyright URL is rebuilt
    assert_eq!(song["title"], "song");

    // Entries for files that disappeared are dropped
    assert!(manifest.iter().all(|e| e["src"] != "./music/gone.wav"));
    assert_eq!(backup_count(music.path()), 1);
}

#[test]
fn test_rerun_is_byte_identical() {
    let music = TempDir::new().expect("Failed to create temp dir");
    let song = music.path().join("song.wav");
    generate_wav(&song, 1.5, 44100);
    tag_wav(&song, "Song", "Band", Some(FAKE_JPEG));
    generate_wav(&music.path().join("plain.wav"), 1.0, 22050);

    let settings = create_test_settings(music.path());
    pipeline::run(&settings).expect("First run should succeed");
    let first = fs::read(music.path().join("playlist.json")).unwrap();

    let result = pipeline::run(&settings).expect("Second run should succeed");
    let second = fs::read(music.path().join("playlist.json")).unwrap();

    assert_eq!(first, second);
    assert_eq!(result.stats.updated, 2);
    assert_eq!(result.stats.new, 0);
}

#[test]
fn test_unrecognized_extensions_are_ignored() {
    let music = TempDir::new().expect("Failed to create temp dir");
    generate_wav(&music.path().join("song.wav"), 1.0, 44100);
    generate_wav(&music.path().join("song.aiff"), 1.0, 44100);
    fs::write(music.path().join("notes.txt"), "not audio").unwrap();

    let settings = create_test_settings(music.path());
    let result = pipeline::run(&settings).expect("Pipeline should succeed");

    assert_eq!(result.total_files, 1);
    let manifest = read_manifest(music.path());
    assert_eq!(manifest.len(), 1);
    assert_eq!(manifest[0]["src"], "./music/song.wav");
}

#[test]
fn test_unreadable_file_is_skipped() {
    let music = TempDir::new().expect("Failed to create temp dir");
    generate_wav(&music.path().join("good.wav"), 1.0, 44100);
    fs::write(music.path().join("broken.wav"), b"this is not a wav file").unwrap();

    let settings = create_test_settings(music.path());
    let result = pipeline::run(&settings).expect("Pipeline should survive a bad file");

    assert_eq!(result.total_files, 2);
    assert_eq!(result.stats.skipped, 1);
    let manifest = read_manifest(music.path());
    assert_eq!(manifest.len(), 1);
    assert_eq!(manifest[0]["src"], "./music/good.wav");
}

#[test]
fn test_empty_folder_leaves_manifest_untouched() {
    let music = TempDir::new().expect("Failed to create temp dir");
    let prior = r#"[{"src": "./music/old.wav", "copyrightUrl": "http://x"}]"#;
    fs::write(music.path().join("playlist.json"), prior).unwrap();

    let settings = create_test_settings(music.path());
    let result = pipeline::run(&settings).expect("Pipeline should succeed");

    assert_eq!(result.total_files, 0);
    assert_eq!(result.outcome, WriteOutcome::Skipped);
    assert_eq!(
        fs::read_to_string(music.path().join("playlist.json")).unwrap(),
        prior
    );
    assert_eq!(backup_count(music.path()), 0);
}

#[test]
fn test_all_files_unreadable_writes_nothing() {
    let music = TempDir::new().expect("Failed to create temp dir");
    fs::write(music.path().join("broken.wav"), b"garbage").unwrap();

    let settings = create_test_settings(music.path());
    let result = pipeline::run(&settings).expect("Pipeline should succeed");

    assert_eq!(result.stats.skipped, 1);
    assert_eq!(result.outcome, WriteOutcome::Skipped);
    assert!(!music.path().join("playlist.json").exists());
}

#[test]
fn test_missing_music_dir_is_fatal() {
    let root = TempDir::new().expect("Failed to create temp dir");
    let settings = create_test_settings(&root.path().join("music"));

    let err = pipeline::run(&settings).expect_err("Missing folder should fail");
    assert!(matches!(err, PlaylistError::MusicDirNotFound(_)));
}

#[test]
fn test_named_playlist_with_separate_library() {
    let music = TempDir::new().expect("Failed to create temp dir");
    let library_dir = TempDir::new().expect("Failed to create temp dir");
    generate_wav(&music.path().join("song.wav"), 1.0, 44100);
    let library_path = library_dir.path().join("curated.json");
    fs::write(
        &library_path,
        r#"[{"src": "./music/song.wav", "copyrightUrl": "http://label"}]"#,
    )
    .unwrap();

    let settings = Settings {
        manifest_path: music.path().join("mygo.json"),
        library_path,
        ..create_test_settings(music.path())
    };
    let result = pipeline::run(&settings).expect("Pipeline should succeed");

    assert_eq!(result.stats.preserved, 1);
    let content = fs::read_to_string(music.path().join("mygo.json")).unwrap();
    assert!(content.contains("http://label"));
    assert!(!music.path().join("playlist.json").exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let music = TempDir::new().expect("Failed to create temp dir");
    let song = music.path().join("song.wav");
    generate_wav(&song, 1.0, 44100);
    tag_wav(&song, "Song", "Band", Some(FAKE_JPEG));

    let settings = Settings {
        dry_run: true,
        ..create_test_settings(music.path())
    };
    let result = pipeline::run(&settings).expect("Dry run should succeed");

    assert_eq!(result.total_files, 1);
    assert_eq!(result.outcome, WriteOutcome::Skipped);
    assert!(!music.path().join("playlist.json").exists());
    assert!(!music.path().join("song.jpg").exists());
}

#[test]
fn test_flac_vorbis_comments_and_picture_are_extracted() {
    let music = TempDir::new().expect("Failed to create temp dir");
    let song = music.path().join("hekiruka.flac");
    generate_flac(&song, 3, 44100);
    tag_file(&song, TagType::VorbisComments, "碧天伴走", "MyGO!!!!!", Some(FAKE_JPEG));

    let settings = create_test_settings(music.path());
    let result = pipeline::run(&settings).expect("Pipeline should succeed");
    assert_eq!(result.stats.new, 1);
    assert_eq!(result.stats.skipped, 0);

    let manifest = read_manifest(music.path());
    assert_eq!(manifest[0]["title"], "碧天伴走");
    assert_eq!(manifest[0]["artist"], "MyGO!!!!!");
    assert_eq!(manifest[0]["cover"], "./music/hekiruka.jpg");
    assert_eq!(manifest[0]["duration"], 3.0);

    let cover = fs::read(music.path().join("hekiruka.jpg")).expect("Cover should be extracted");
    assert_eq!(cover, FAKE_JPEG);
}
