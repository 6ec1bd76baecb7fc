//! Progress reporting abstractions for rotate-batch
//!
//! This module provides a trait-based abstraction for progress reporting,
//! allowing the core library to report progress without depending on
//! specific channel implementations or UI concerns.

use std::path::PathBuf;

/// Core trait for progress reporting
///
/// Implementations must be callable from the blocking worker threads that
/// run rotation jobs.
pub trait ProgressProvider: Send + Sync {
    /// Report a progress update
    fn report(&self, update: ProgressUpdate);

    /// Create a child provider for nested operations
    fn create_child(&self, name: &str) -> Box<dyn ProgressProvider>;

    /// Signal that the operation is complete
    fn complete(&self);
}

/// Unified progress update type
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressUpdate {
    /// Discovery finished and the batch is about to start
    BatchStarted { total_files: usize },

    /// A job picked up its source file
    JobStarted {
        index: usize,
        total: usize,
        file_name: String,
        total_rotations: usize,
    },

    /// One rotation of a job was written
    RotationSaved {
        file_name: String,
        angle: u16,
        output_path: PathBuf,
    },

    /// A job ended, successfully or not
    JobFinished {
        file_name: String,
        success: bool,
        files_written: usize,
        message: Option<String>,
    },

    /// Generic status message
    Status { message: String },
}

/// Null implementation for when no progress is needed
pub struct NullProvider;

impl ProgressProvider for NullProvider {
    fn report(&self, _update: ProgressUpdate) {}

    fn create_child(&self, _name: &str) -> Box<dyn ProgressProvider> {
        Box::new(NullProvider)
    }

    fn complete(&self) {}
}
