//! Music folder discovery

pub mod scanner;

pub use scanner::{scan, DiscoveredFile};
