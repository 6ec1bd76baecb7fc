//! Folder-level batch processing
//!
//! This module turns an input folder into a batch of rotation jobs:
//! - Input validation and idempotent output folder creation
//! - Discovery of image files directly inside the input folder
//! - Job execution on blocking worker threads, bounded by a semaphore
//! - Per-file success/failure accounting in discovery order

use crate::{
    BatchConfig, Error, Result,
    error::{DirectoryError, InternalError},
    file_discovery::{DiscoveredFile, FileDiscoveryOptions, discover_files},
    generator::{JobResult, RotationGenerator, RotationJob},
    imaging::{ImageCrateBackend, ImagingBackend},
    progress::{ProgressProvider, ProgressUpdate},
    sweep::ROTATIONS_PER_IMAGE,
};
use futures::stream::{FuturesUnordered, StreamExt};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// Aggregated outcome of one folder run
#[derive(Debug)]
pub struct BatchResult {
    /// Jobs that wrote all of their rotations
    pub successful: usize,
    /// Jobs that failed to decode or stopped on a write failure
    pub failed: usize,
    /// File names of every attempted source, in discovery order
    pub attempted: Vec<String>,
    /// Individual job results, in discovery order
    pub jobs: Vec<JobResult>,
    /// Folder the rotations were written to
    pub output_dir: PathBuf,
    /// Total processing time
    pub total_time: Duration,
}

impl BatchResult {
    fn empty(output_dir: &Path, total_time: Duration) -> Self {
        Self {
            successful: 0,
            failed: 0,
            attempted: Vec::new(),
            jobs: Vec::new(),
            output_dir: output_dir.to_path_buf(),
            total_time,
        }
    }

    /// Number of source files attempted
    pub fn total(&self) -> usize {
        self.successful + self.failed
    }

    /// True when no job failed (also true for an empty batch)
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    /// Output files written across all jobs
    pub fn files_written(&self) -> usize {
        self.jobs.iter().map(|job| job.files_written).sum()
    }

    /// Jobs that did not complete
    pub fn failures(&self) -> impl Iterator<Item = &JobResult> {
        self.jobs.iter().filter(|job| !job.is_success())
    }
}

/// Runs the rotation generator over every image in a folder
pub struct BatchProcessor<B = ImageCrateBackend> {
    config: BatchConfig,
    generator: Arc<RotationGenerator<B>>,
}

impl BatchProcessor<ImageCrateBackend> {
    /// Create a batch processor using the default imaging backend
    pub fn new(config: BatchConfig) -> Self {
        Self::with_backend(config, ImageCrateBackend::new())
    }
}

impl Default for BatchProcessor<ImageCrateBackend> {
    fn default() -> Self {
        Self::new(BatchConfig::default())
    }
}

impl<B: ImagingBackend + 'static> BatchProcessor<B> {
    /// Create a batch processor on top of a specific imaging backend
    pub fn with_backend(config: BatchConfig, backend: B) -> Self {
        Self {
            config,
            generator: Arc::new(RotationGenerator::new(backend)),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Rotate every image found directly inside `input_dir` into `output_dir`
    ///
    /// Only directory problems are returned as errors. Failed jobs are
    /// counted in the result and never stop the batch.
    pub async fn process_folder(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        progress: Arc<dyn ProgressProvider>,
    ) -> Result<BatchResult> {
        let start_time = Instant::now();

        Self::validate_input(input_dir).await?;

        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|e| DirectoryError::create_output(output_dir, e))?;
        debug!("Output directory ready: {}", output_dir.display());

        let files = self.discover(input_dir)?;
        if files.is_empty() {
            warn!("No image files found in {}", input_dir.display());
            progress.report(ProgressUpdate::Status {
                message: format!("No image files found in {}", input_dir.display()),
            });
            progress.complete();
            return Ok(BatchResult::empty(output_dir, start_time.elapsed()));
        }

        let total = files.len();
        info!("Found {total} image file(s) in {}", input_dir.display());
        progress.report(ProgressUpdate::BatchStarted { total_files: total });

        let jobs: Vec<RotationJob> = files
            .iter()
            .map(|file| Self::job_for(file, output_dir))
            .collect();
        let attempted: Vec<String> = jobs.iter().map(RotationJob::file_name).collect();

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_jobs.max(1)));
        let mut futures = FuturesUnordered::new();

        for (index, job) in jobs.into_iter().enumerate() {
            let generator = Arc::clone(&self.generator);
            let semaphore = Arc::clone(&semaphore);
            let progress = Arc::clone(&progress);

            futures.push(async move {
                // Acquire inside the task so the producer loop never blocks
                let permit = semaphore.acquire_owned().await.map_err(|_e| {
                    Error::Internal(InternalError::assertion("Failed to acquire semaphore"))
                })?;

                let file_name = job.file_name();
                progress.report(ProgressUpdate::JobStarted {
                    index: index + 1,
                    total,
                    file_name: file_name.clone(),
                    total_rotations: ROTATIONS_PER_IMAGE,
                });

                let child: Arc<dyn ProgressProvider> = Arc::from(progress.create_child(&file_name));
                let started = Instant::now();
                let worker_job = job.clone();
                let worker_progress = Arc::clone(&child);
                let outcome = tokio::task::spawn_blocking(move || {
                    generator.rotate(&worker_job, worker_progress.as_ref())
                })
                .await;
                child.complete();
                drop(permit);

                let result = outcome.unwrap_or_else(|e| {
                    JobResult::aborted(
                        &job,
                        InternalError::worker_failed(&file_name, e.to_string()),
                        started.elapsed(),
                    )
                });
                Ok::<_, Error>((index, result))
            });
        }

        let mut slots: Vec<Option<JobResult>> = std::iter::repeat_with(|| None).take(total).collect();
        let mut successful = 0usize;
        let mut failed = 0usize;

        while let Some(next) = futures.next().await {
            let (index, result) = next?;
            let file_name = attempted[index].clone();

            if result.is_success() {
                successful += 1;
                info!("Successfully rotated {file_name}");
            } else {
                failed += 1;
                warn!(
                    "Failed to rotate {file_name}: {}",
                    result.error_message().unwrap_or_default()
                );
            }

            progress.report(ProgressUpdate::JobFinished {
                file_name,
                success: result.is_success(),
                files_written: result.files_written,
                message: result.error_message(),
            });
            slots[index] = Some(result);
        }

        let jobs: Vec<JobResult> = slots.into_iter().flatten().collect();
        if jobs.len() != total {
            return Err(Error::Internal(InternalError::assertion(format!(
                "{} of {total} jobs reported back",
                jobs.len()
            ))));
        }

        progress.complete();
        info!(
            "Batch finished: {successful} successful, {failed} failed in {:.2?}",
            start_time.elapsed()
        );

        Ok(BatchResult {
            successful,
            failed,
            attempted,
            jobs,
            output_dir: output_dir.to_path_buf(),
            total_time: start_time.elapsed(),
        })
    }

    async fn validate_input(input_dir: &Path) -> Result<()> {
        match tokio::fs::metadata(input_dir).await {
            Ok(metadata) if metadata.is_dir() => Ok(()),
            Ok(_) => Err(DirectoryError::not_a_directory(input_dir).into()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(DirectoryError::input_not_found(input_dir).into())
            }
            Err(e) => Err(DirectoryError::list_input(input_dir, e.to_string()).into()),
        }
    }

    fn discover(&self, input_dir: &Path) -> Result<Vec<DiscoveredFile>> {
        let options = FileDiscoveryOptions::new().with_sort_by_name(self.config.sort_files);
        Ok(discover_files(input_dir, options)?)
    }

    fn job_for(file: &DiscoveredFile, output_dir: &Path) -> RotationJob {
        let base_name = file.base_name().unwrap_or_default();
        RotationJob::new(&file.path, output_dir, &base_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NullProvider;
    use std::fs;
    use tempfile::TempDir;

    fn null_progress() -> Arc<dyn ProgressProvider> {
        Arc::new(NullProvider)
    }

    #[tokio::test]
    async fn test_missing_input_is_fatal() {
        let dir = TempDir::new().unwrap();
        let processor = BatchProcessor::new(BatchConfig::default());

        let err = processor
            .process_folder(&dir.path().join("missing"), &dir.path().join("out"), null_progress())
            .await
            .unwrap_err();

        assert!(err.is_fatal());
        assert!(matches!(
            err,
            Error::Directory(DirectoryError::InputNotFound { .. })
        ));
        assert!(!dir.path().join("out").exists());
    }

    #[tokio::test]
    async fn test_input_file_is_not_a_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.png");
        fs::write(&file, b"x").unwrap();
        let processor = BatchProcessor::new(BatchConfig::default());

        let err = processor
            .process_folder(&file, &dir.path().join("out"), null_progress())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Directory(DirectoryError::NotADirectory { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_folder_creates_output_and_counts_nothing() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let out_dir = output.path().join("nested").join("out");
        fs::write(input.path().join("readme.txt"), b"hello").unwrap();
        let processor = BatchProcessor::new(BatchConfig::default());

        let result = processor
            .process_folder(input.path(), &out_dir, null_progress())
            .await
            .unwrap();

        assert_eq!(result.total(), 0);
        assert!(result.all_succeeded());
        assert!(result.attempted.is_empty());
        assert!(out_dir.is_dir());
    }

    #[tokio::test]
    async fn test_output_path_that_is_a_file_is_fatal() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let blocker = output.path().join("taken");
        fs::write(&blocker, b"x").unwrap();
        let processor = BatchProcessor::new(BatchConfig::default());

        let err = processor
            .process_folder(input.path(), &blocker.join("out"), null_progress())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Directory(DirectoryError::CreateOutput { .. })
        ));
    }

    #[tokio::test]
    async fn test_undecodable_files_are_counted_as_failed() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(input.path().join("a.png"), b"not a png").unwrap();
        fs::write(input.path().join("b.jpg"), b"not a jpeg").unwrap();
        let processor = BatchProcessor::new(BatchConfig::default());

        let result = processor
            .process_folder(input.path(), output.path(), null_progress())
            .await
            .unwrap();

        assert_eq!(result.successful, 0);
        assert_eq!(result.failed, 2);
        assert_eq!(result.attempted, vec!["a.png", "b.jpg"]);
        assert_eq!(result.files_written(), 0);
        assert_eq!(result.failures().count(), 2);
    }
}
