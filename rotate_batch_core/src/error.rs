//! Error types for the rotate-batch core library
//!
//! Errors are organized by how far they reach: imaging and job errors stay
//! local to one source file, directory errors abort the whole batch.

use thiserror::Error;

pub mod directory;
pub mod imaging;
pub mod internal;
pub mod io;
pub mod job;

pub use self::directory::DirectoryError;
pub use self::imaging::ImagingError;
pub use self::io::{IoError, IoErrorKind};
pub use self::job::JobError;
pub use internal::InternalError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the rotate-batch core library
///
/// - I/O errors: file system operations with path context
/// - Imaging errors: decode, rotate and encode failures of the backend
/// - Job errors: a single rotation job failed (decode or write)
/// - Directory errors: input/output directories unusable, fatal to a batch
/// - Internal errors: worker and pattern failures
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Imaging backend errors
    #[error(transparent)]
    Imaging(#[from] ImagingError),

    /// Failure of one rotation job
    #[error(transparent)]
    Job(#[from] JobError),

    /// Input or output directory problems
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// Internal library errors
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl Error {
    /// Whether this error stops a whole batch rather than a single job
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Directory(_) | Self::Internal(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::io;
    use std::path::Path;

    #[test]
    fn test_directory_errors_are_fatal() {
        let error = Error::Directory(DirectoryError::input_not_found(Path::new("/missing")));
        assert!(error.is_fatal());
        assert!(error.to_string().contains("/missing"));
    }

    #[test]
    fn test_job_errors_are_not_fatal() {
        let error = Error::Job(JobError::decode(
            Path::new("/images/broken.png"),
            ImagingError::decode("invalid signature"),
        ));
        assert!(!error.is_fatal());
        assert!(error.to_string().contains("broken.png"));
    }

    #[test]
    fn test_imaging_error_display() {
        let error = Error::Imaging(ImagingError::encode("buffer too small"));
        let display_string = format!("{error}");

        assert!(display_string.contains("encode"));
        assert!(display_string.contains("buffer too small"));
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();

        match error {
            Error::Io(io_err) => {
                assert_eq!(io_err.kind, IoErrorKind::FileNotFound);
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_error_source_chain() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let error = Error::Job(JobError::write(
            10,
            Path::new("/out/a_rotated_010.png"),
            IoError::from_std(io_error),
        ));

        let source = error.source().expect("write error carries a source");
        assert!(source.to_string().contains("Permission denied"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_error() -> Result<()> {
            Err(InternalError::assertion("unreachable").into())
        }

        assert!(returns_error().is_err());
    }
}
