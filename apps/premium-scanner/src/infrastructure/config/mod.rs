//! Configuration
//!
//! Scanner configuration loaded from environment variables.

mod settings;

pub use settings::{ConfigError, OutputFormat, ScanSettings, ScannerConfig};
