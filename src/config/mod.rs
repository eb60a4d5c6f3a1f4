//! Configuration: CLI flags and the settings the pipeline consumes

pub mod cli;
pub mod settings;

pub use cli::Cli;
pub use settings::Settings;
