//! Progress reporting sinks
//!
//! The extractor reports per-file progress through `Progress` instead of
//! printing, so tests can run silently and the CLI can draw a progress bar.

use crate::types::EntryStatus;
use indicatif::{ProgressBar, ProgressStyle};

/// Receives per-file progress from the extractor
pub trait Progress {
    fn start(&self, total: usize);

    fn file_started(&self, file_name: &str);

    /// `None` means the file was skipped
    fn file_done(&self, file_name: &str, status: Option<EntryStatus>);

    fn finish(&self);
}

/// Discards all progress
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn start(&self, _total: usize) {}
    fn file_started(&self, _file_name: &str) {}
    fn file_done(&self, _file_name: &str, _status: Option<EntryStatus>) {}
    fn finish(&self) {}
}

/// Console progress bar
pub struct ConsoleProgress {
    bar: ProgressBar,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        Self { bar }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for ConsoleProgress {
    fn start(&self, total: usize) {
        self.bar.set_length(total as u64);
    }

    fn file_started(&self, file_name: &str) {
        self.bar.set_message(file_name.to_string());
    }

    fn file_done(&self, file_name: &str, status: Option<EntryStatus>) {
        if status.is_none() {
            self.bar.println(format!("  skipped {}", file_name));
        }
        self.bar.inc(1);
    }

    fn finish(&self) {
        self.bar.finish_with_message("Extraction complete");
    }
}
