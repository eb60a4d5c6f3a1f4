//! Batch pipeline: discover, load, extract, write

pub mod orchestrator;
pub mod progress;

pub use orchestrator::{run, run_with, PipelineResult};
pub use progress::{ConsoleProgress, NoProgress, Progress};
