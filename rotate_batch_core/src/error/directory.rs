//! Directory error types
//!
//! Without a readable input directory and a writable output directory there
//! is no work to do, so these are the only errors that abort a batch.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Input/output directory errors
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Input directory does not exist
    #[error("Input directory not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    /// Input path exists but is not a directory
    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// Output directory could not be created
    #[error("Cannot create output directory {}: {source}", path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input directory could not be listed
    #[error("Cannot list directory {}: {message}", path.display())]
    ListInput { path: PathBuf, message: String },
}

impl DirectoryError {
    /// Create an input not found error
    pub fn input_not_found(path: &Path) -> Self {
        Self::InputNotFound {
            path: path.to_path_buf(),
        }
    }

    /// Create a not-a-directory error
    pub fn not_a_directory(path: &Path) -> Self {
        Self::NotADirectory {
            path: path.to_path_buf(),
        }
    }

    /// Create an output creation error
    pub fn create_output(path: &Path, source: std::io::Error) -> Self {
        Self::CreateOutput {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create a listing error
    pub fn list_input(path: &Path, message: impl Into<String>) -> Self {
        Self::ListInput {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    /// Path the error refers to
    pub fn path(&self) -> &Path {
        match self {
            Self::InputNotFound { path }
            | Self::NotADirectory { path }
            | Self::CreateOutput { path, .. }
            | Self::ListInput { path, .. } => path,
        }
    }
}
