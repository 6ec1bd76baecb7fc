//! rotate-batch core library
//!
//! Generates the full rotation sweep (0° to 358° in 2° steps) of every image
//! in a folder, one PNG file per angle, with per-file success accounting.

pub mod batch_processor;
pub mod error;
pub mod file_discovery;
pub mod generator;
pub mod imaging;
pub mod progress;
pub mod sweep;

// Re-export main types
pub use batch_processor::{BatchProcessor, BatchResult};
pub use error::{Error, Result};
pub use generator::{JobResult, JobStatus, RotationGenerator, RotationJob};
pub use imaging::{ImageCrateBackend, ImagingBackend};
pub use progress::{NullProvider, ProgressProvider, ProgressUpdate};
pub use sweep::{ROTATIONS_PER_IMAGE, SWEEP_STEP_DEGREES, rotated_file_name, sweep_angles};

/// Batch processing configuration
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Source images processed at the same time
    pub max_concurrent_jobs: usize,
    /// Process sources in file name order instead of directory listing order
    pub sort_files: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_jobs: 1,
            sort_files: true,
        }
    }
}

impl BatchConfig {
    /// Set the number of concurrent jobs (at least one)
    pub fn with_max_concurrent_jobs(mut self, jobs: usize) -> Self {
        self.max_concurrent_jobs = jobs.max(1);
        self
    }

    /// Set whether sources are sorted by file name
    pub fn with_sort_files(mut self, sort: bool) -> Self {
        self.sort_files = sort;
        self
    }
}
