//! Per-job error types
//!
//! A job error ends one rotation sweep. The orchestrator records it against
//! the source file and moves on to the next one.

use super::{ImagingError, IoError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Source of a failed write: the encoder or the file system
#[derive(Error, Debug)]
pub enum WriteFailure {
    #[error(transparent)]
    Encode(#[from] ImagingError),

    #[error(transparent)]
    Io(#[from] IoError),
}

/// Failure of a single rotation job
#[derive(Error, Debug)]
pub enum JobError {
    /// Source could not be read or decoded, nothing was written
    #[error("Cannot open image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeFailure,
    },

    /// A rotation could not be encoded or written, the sweep stopped there
    #[error("Cannot save rotation {angle} to {}: {source}", path.display())]
    Write {
        angle: u16,
        path: PathBuf,
        #[source]
        source: WriteFailure,
    },
}

/// Source of a failed decode: reading the file or interpreting its bytes
#[derive(Error, Debug)]
pub enum DecodeFailure {
    #[error(transparent)]
    Read(#[from] IoError),

    #[error(transparent)]
    Imaging(#[from] ImagingError),
}

impl JobError {
    /// Create a decode error
    pub fn decode(path: &Path, source: impl Into<DecodeFailure>) -> Self {
        Self::Decode {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    /// Create a write error for the given sweep angle
    pub fn write(angle: u16, path: &Path, source: impl Into<WriteFailure>) -> Self {
        Self::Write {
            angle,
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    /// Angle at which the sweep stopped, if any rotation was attempted
    pub fn failed_angle(&self) -> Option<u16> {
        match self {
            Self::Decode { .. } => None,
            Self::Write { angle, .. } => Some(*angle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_decode_error_has_no_angle() {
        let error = JobError::decode(
            Path::new("/in/notes.png"),
            ImagingError::decode("bad header"),
        );

        assert_eq!(error.failed_angle(), None);
        assert!(error.to_string().contains("notes.png"));
        assert!(error.to_string().contains("bad header"));
    }

    #[test]
    fn test_write_error_reports_angle() {
        let io_error = io::Error::other("disk unplugged");
        let error = JobError::write(
            124,
            Path::new("/out/cat_rotated_124.png"),
            IoError::from_std(io_error),
        );

        assert_eq!(error.failed_angle(), Some(124));
        assert!(error.to_string().contains("rotation 124"));
        assert!(error.to_string().contains("cat_rotated_124.png"));
    }
}
