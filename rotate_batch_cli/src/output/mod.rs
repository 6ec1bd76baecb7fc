//! Batch summary output

mod formatters;

pub use formatters::{JsonFormatter, TextFormatter};

use anyhow::Result;
use rotate_batch_core::BatchResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SummaryFormat {
    /// Human readable summary on stderr/stdout
    Text,
    /// One JSON document on stdout
    Json,
}

impl FromStr for SummaryFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!("Unknown output format: {} (expected 'text' or 'json')", s),
        }
    }
}

impl fmt::Display for SummaryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Trait for summary formatters
pub trait OutputFormatter: Send + Sync {
    /// Format the outcome of a whole batch
    fn format_batch(&self, result: &BatchResult) -> Result<String>;
}

/// Create a formatter based on output format
///
/// `list_files` adds a line per source image to text output, used when no
/// progress renderer printed them already.
pub fn create_formatter(
    format: SummaryFormat,
    use_color: bool,
    list_files: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        SummaryFormat::Text => {
            Box::new(TextFormatter::new(use_color).with_file_lines(list_files))
        }
        SummaryFormat::Json => Box::new(JsonFormatter::new(true)),
    }
}
