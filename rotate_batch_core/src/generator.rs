//! Rotation generator: one source image in, one full sweep of PNG files out
//!
//! A job decodes its source once, then for every angle of the sweep rotates
//! the original raster, encodes it and writes it next to the others. The
//! first failed write ends the job; files already written stay on disk.

use crate::error::{Error, InternalError, IoError, JobError};
use crate::imaging::{ImageCrateBackend, ImagingBackend};
use crate::progress::{NullProvider, ProgressProvider, ProgressUpdate};
use crate::sweep::{ROTATIONS_PER_IMAGE, rotated_file_path, sweep_angles};
use log::{debug, error, info};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// One source image and where its rotations go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationJob {
    /// Image to rotate
    pub source_path: PathBuf,
    /// Prefix of every output file name
    pub base_name: String,
    /// Existing directory receiving the output files
    pub output_dir: PathBuf,
}

impl RotationJob {
    /// Create a job with an explicit base name
    pub fn new(source_path: &Path, output_dir: &Path, base_name: &str) -> Self {
        Self {
            source_path: source_path.to_path_buf(),
            base_name: base_name.to_string(),
            output_dir: output_dir.to_path_buf(),
        }
    }

    /// Create a job whose base name is the source file name minus its
    /// extension (`holiday.final.jpg` -> `holiday.final`)
    pub fn for_source(source_path: &Path, output_dir: &Path) -> Option<Self> {
        let base_name = source_path.file_stem()?.to_string_lossy();
        Some(Self::new(source_path, output_dir, &base_name))
    }

    /// File name of the source, for reporting
    pub fn file_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source_path.display().to_string())
    }
}

/// Terminal state of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobStatus {
    /// All rotations written
    Completed,
    /// Source unreadable or not an image, nothing written
    DecodeFailed,
    /// Writing the rotation at `angle` failed, earlier angles are on disk
    WriteFailed { angle: u16 },
    /// The worker running the job ended without a result
    Aborted,
}

/// Outcome of one rotation job
#[derive(Debug)]
pub struct JobResult {
    pub source_path: PathBuf,
    pub base_name: String,
    pub status: JobStatus,
    /// Output files written before the job ended
    pub files_written: usize,
    pub error: Option<Error>,
    pub processing_time: Duration,
}

impl JobResult {
    /// True only if the source decoded and every rotation was written
    pub fn is_success(&self) -> bool {
        self.status == JobStatus::Completed
    }

    /// Result for a job whose worker died before reporting back
    pub fn aborted(job: &RotationJob, error: InternalError, processing_time: Duration) -> Self {
        Self {
            source_path: job.source_path.clone(),
            base_name: job.base_name.clone(),
            status: JobStatus::Aborted,
            files_written: 0,
            error: Some(Error::Internal(error)),
            processing_time,
        }
    }

    /// Human readable failure reason, if any
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }
}

/// Produces the rotation sweep for single images
#[derive(Debug, Clone)]
pub struct RotationGenerator<B = ImageCrateBackend> {
    backend: B,
}

impl Default for RotationGenerator<ImageCrateBackend> {
    fn default() -> Self {
        Self::new(ImageCrateBackend::new())
    }
}

impl<B: ImagingBackend> RotationGenerator<B> {
    /// Create a generator on top of an imaging backend
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Imaging backend in use
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Boolean form of [`RotationGenerator::rotate`] without progress reporting
    pub fn rotate_file(&self, source_path: &Path, output_dir: &Path, base_name: &str) -> bool {
        let job = RotationJob::new(source_path, output_dir, base_name);
        self.rotate(&job, &NullProvider).is_success()
    }

    /// Run the full sweep for one job
    pub fn rotate(&self, job: &RotationJob, progress: &dyn ProgressProvider) -> JobResult {
        let start = Instant::now();
        let file_name = job.file_name();
        let mut files_written = 0;

        let outcome = self.decode_source(&job.source_path).and_then(|original| {
            info!("Successfully opened image: {}", job.source_path.display());
            self.write_sweep(job, &original, &file_name, progress, &mut files_written)
        });

        let (status, error) = match outcome {
            Ok(()) => (JobStatus::Completed, None),
            Err(e) => {
                let status = match e.failed_angle() {
                    Some(angle) => JobStatus::WriteFailed { angle },
                    None => JobStatus::DecodeFailed,
                };
                error!("{e}");
                (status, Some(Error::Job(e)))
            }
        };

        JobResult {
            source_path: job.source_path.clone(),
            base_name: job.base_name.clone(),
            status,
            files_written,
            error,
            processing_time: start.elapsed(),
        }
    }

    fn decode_source(&self, source_path: &Path) -> Result<B::Raster, JobError> {
        let bytes = std::fs::read(source_path)
            .map_err(|e| JobError::decode(source_path, IoError::from_std(e).with_path(source_path)))?;
        self.backend
            .decode(&bytes)
            .map_err(|e| JobError::decode(source_path, e))
    }

    fn write_sweep(
        &self,
        job: &RotationJob,
        original: &B::Raster,
        file_name: &str,
        progress: &dyn ProgressProvider,
        files_written: &mut usize,
    ) -> Result<(), JobError> {
        for angle in sweep_angles() {
            let output_path = rotated_file_path(&job.output_dir, &job.base_name, angle);

            let bytes = self
                .backend
                .rotate_clockwise(original, f32::from(angle))
                .and_then(|rotated| self.backend.encode_png(&rotated))
                .map_err(|e| JobError::write(angle, &output_path, e))?;

            std::fs::write(&output_path, &bytes).map_err(|e| {
                JobError::write(
                    angle,
                    &output_path,
                    IoError::from_std(e).with_path(&output_path),
                )
            })?;

            *files_written += 1;
            debug!(
                "Saved rotated image ({angle} degrees): {}",
                output_path.display()
            );
            progress.report(ProgressUpdate::RotationSaved {
                file_name: file_name.to_string(),
                angle,
                output_path,
            });
        }

        debug_assert_eq!(*files_written, ROTATIONS_PER_IMAGE);
        Ok(())
    }
}
