//! File discovery for finding source images in a folder
//!
//! Only entries directly inside the input folder are considered, and they
//! are matched against the supported image extensions in any letter case.

mod extensions;
mod filter;
mod walker;

pub use extensions::IMAGE_EXTENSIONS;
pub use filter::ImageMatcher;
pub use walker::{FileDiscovery, FileDiscoveryOptions, discover_files};

use crate::error::{DirectoryError, Error, InternalError};
use std::path::PathBuf;

/// Result of file discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Path to the discovered file
    pub path: PathBuf,
    /// Size of the file in bytes
    pub size: u64,
}

impl DiscoveredFile {
    /// File name without its final extension
    pub fn base_name(&self) -> Option<String> {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
    }
}

/// Error type for file discovery operations
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("Invalid glob pattern: {0}")]
    InvalidPattern(String),

    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Cannot list {}: {message}", path.display())]
    Walk { path: PathBuf, message: String },
}

impl From<DiscoveryError> for Error {
    fn from(err: DiscoveryError) -> Self {
        match err {
            DiscoveryError::InvalidPattern(pattern) => {
                Error::Internal(InternalError::invalid_pattern(pattern))
            }
            DiscoveryError::PathNotFound(path) => {
                Error::Directory(DirectoryError::input_not_found(&path))
            }
            DiscoveryError::NotADirectory(path) => {
                Error::Directory(DirectoryError::not_a_directory(&path))
            }
            DiscoveryError::Walk { path, message } => {
                Error::Directory(DirectoryError::list_input(&path, message))
            }
        }
    }
}

/// Result type for file discovery operations
pub type Result<T> = std::result::Result<T, DiscoveryError>;
