//! rotate-batch command line interface
//!
//! Argument handling lives in the binary; this library holds everything the
//! binary and the integration tests share.

pub mod config;
pub mod error;
pub mod orchestrators;
pub mod output;
pub mod paths;
pub mod progress;
pub mod prompt;
pub mod terminal;

pub use config::{AppConfig, CliOverrides, ConfigManager};
pub use error::{CliError, CliResult, ExitCode};
pub use orchestrators::RotateOrchestrator;
pub use output::SummaryFormat;
