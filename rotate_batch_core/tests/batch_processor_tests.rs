//! Integration tests for folder-level batch processing

use rotate_batch_core::{
    BatchConfig, BatchProcessor, Error, JobStatus, NullProvider, ProgressProvider,
    ProgressUpdate, ROTATIONS_PER_IMAGE, error::DirectoryError,
};
use rotate_batch_test_utils::{MockImaging, RecordingProvider, TestImageBuilder};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn null_progress() -> Arc<dyn ProgressProvider> {
    Arc::new(NullProvider)
}

fn count_with_prefix(dir: &Path, prefix: &str) -> usize {
    fs::read_dir(dir)
        .unwrap()
        .filter(|entry| {
            entry
                .as_ref()
                .unwrap()
                .file_name()
                .to_string_lossy()
                .starts_with(prefix)
        })
        .count()
}

fn mock_processor(config: BatchConfig) -> BatchProcessor<MockImaging> {
    BatchProcessor::with_backend(config, MockImaging::new())
}

#[tokio::test]
async fn test_only_allow_listed_extensions_are_processed() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let mut builder = TestImageBuilder::new(input.path());
    builder.generate_image("a.png", 6, 4).unwrap();
    builder.generate_text_file("b.txt", "not an image").unwrap();
    builder.generate_image("c.JPG", 6, 4).unwrap();

    let result = BatchProcessor::new(BatchConfig::default())
        .process_folder(input.path(), output.path(), null_progress())
        .await
        .unwrap();

    assert_eq!(result.successful + result.failed, 2);
    assert_eq!(result.successful, 2);
    assert_eq!(result.attempted, vec!["a.png", "c.JPG"]);
    assert_eq!(count_with_prefix(output.path(), "a_rotated_"), ROTATIONS_PER_IMAGE);
    assert_eq!(count_with_prefix(output.path(), "c_rotated_"), ROTATIONS_PER_IMAGE);
    assert_eq!(count_with_prefix(output.path(), "b_rotated_"), 0);
    assert_eq!(result.files_written(), 2 * ROTATIONS_PER_IMAGE);
}

#[tokio::test]
async fn test_folder_without_images_is_not_an_error() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("notes.md"), b"# notes").unwrap();
    let progress = RecordingProvider::new();

    let result = mock_processor(BatchConfig::default())
        .process_folder(input.path(), output.path(), Arc::new(progress.clone()))
        .await
        .unwrap();

    assert_eq!(result.successful, 0);
    assert_eq!(result.failed, 0);
    assert!(matches!(
        progress.updates().as_slice(),
        [ProgressUpdate::Status { .. }]
    ));
}

#[tokio::test]
async fn test_subdirectories_are_not_descended() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("top.png"), MockImaging::image_bytes("top")).unwrap();
    let nested = input.path().join("album.png");
    fs::create_dir(&nested).unwrap();
    fs::write(nested.join("inner.png"), MockImaging::image_bytes("inner")).unwrap();

    let result = mock_processor(BatchConfig::default())
        .process_folder(input.path(), output.path(), null_progress())
        .await
        .unwrap();

    assert_eq!(result.attempted, vec!["top.png"]);
    assert_eq!(result.successful, 1);
}

#[tokio::test]
async fn test_corrupt_file_does_not_stop_the_batch() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let mut builder = TestImageBuilder::new(input.path());
    builder.generate_corrupted_file("a_broken.png", 128).unwrap();
    builder.generate_image("b_good.png", 5, 5).unwrap();

    let result = BatchProcessor::new(BatchConfig::default())
        .process_folder(input.path(), output.path(), null_progress())
        .await
        .unwrap();

    assert_eq!(result.successful, 1);
    assert_eq!(result.failed, 1);
    assert_eq!(result.jobs[0].status, JobStatus::DecodeFailed);
    assert!(result.jobs[1].is_success());
    assert_eq!(count_with_prefix(output.path(), "a_broken_rotated_"), 0);
    assert_eq!(
        count_with_prefix(output.path(), "b_good_rotated_"),
        ROTATIONS_PER_IMAGE
    );
}

#[tokio::test]
async fn test_batch_completes_when_every_decode_fails() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    for name in ["a.png", "b.jpg", "c.webp"] {
        fs::write(input.path().join(name), MockImaging::image_bytes(name)).unwrap();
    }

    let processor =
        BatchProcessor::with_backend(BatchConfig::default(), MockImaging::new().failing_decode());
    let result = processor
        .process_folder(input.path(), output.path(), null_progress())
        .await
        .unwrap();

    assert_eq!(result.successful, 0);
    assert_eq!(result.failed, 3);
    assert!(
        result
            .jobs
            .iter()
            .all(|job| job.status == JobStatus::DecodeFailed && job.files_written == 0)
    );
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_write_failure_marks_only_that_file_failed() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("a.png"), MockImaging::image_bytes("a")).unwrap();
    fs::write(input.path().join("b.png"), MockImaging::image_bytes("b")).unwrap();
    fs::create_dir(output.path().join("a_rotated_004.png")).unwrap();

    let result = mock_processor(BatchConfig::default())
        .process_folder(input.path(), output.path(), null_progress())
        .await
        .unwrap();

    assert_eq!(result.successful, 1);
    assert_eq!(result.failed, 1);
    assert_eq!(result.jobs[0].status, JobStatus::WriteFailed { angle: 4 });
    assert_eq!(result.jobs[0].files_written, 2);
    assert!(result.jobs[1].is_success());
}

#[tokio::test]
async fn test_concurrent_jobs_keep_discovery_order() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    for name in ["e.png", "b.jpeg", "d.webp", "a.gif", "c.bmp"] {
        fs::write(input.path().join(name), MockImaging::image_bytes(name)).unwrap();
    }
    let config = BatchConfig::default().with_max_concurrent_jobs(3);

    let result = mock_processor(config)
        .process_folder(input.path(), output.path(), null_progress())
        .await
        .unwrap();

    assert_eq!(result.successful, 5);
    assert_eq!(result.failed, 0);
    assert_eq!(
        result.attempted,
        vec!["a.gif", "b.jpeg", "c.bmp", "d.webp", "e.png"]
    );
    let bases: Vec<&str> = result.jobs.iter().map(|j| j.base_name.as_str()).collect();
    assert_eq!(bases, vec!["a", "b", "c", "d", "e"]);
    assert_eq!(result.files_written(), 5 * ROTATIONS_PER_IMAGE);
}

#[tokio::test]
async fn test_unsorted_listing_processes_the_same_files() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    for name in ["z.png", "m.png", "a.png"] {
        fs::write(input.path().join(name), MockImaging::image_bytes(name)).unwrap();
    }

    let result = mock_processor(BatchConfig::default().with_sort_files(false))
        .process_folder(input.path(), output.path(), null_progress())
        .await
        .unwrap();

    let mut attempted = result.attempted.clone();
    attempted.sort();
    assert_eq!(attempted, vec!["a.png", "m.png", "z.png"]);
    assert_eq!(result.successful, 3);
}

#[tokio::test]
async fn test_progress_reports_batch_and_job_lifecycle() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("a.png"), MockImaging::image_bytes("a")).unwrap();
    fs::write(input.path().join("b.png"), b"garbage").unwrap();
    let progress = RecordingProvider::new();

    mock_processor(BatchConfig::default())
        .process_folder(input.path(), output.path(), Arc::new(progress.clone()))
        .await
        .unwrap();

    let updates = progress.updates();
    assert_eq!(
        updates.first(),
        Some(&ProgressUpdate::BatchStarted { total_files: 2 })
    );
    assert_eq!(
        progress.finished_jobs(),
        vec![("a.png".to_string(), true), ("b.png".to_string(), false)]
    );
    assert_eq!(progress.saved_angles("a.png").len(), ROTATIONS_PER_IMAGE);
    assert!(progress.saved_angles("b.png").is_empty());
    // One completion per job plus one for the batch.
    assert_eq!(progress.completions(), 3);
}

#[tokio::test]
async fn test_missing_input_folder_is_fatal() {
    let dir = TempDir::new().unwrap();

    let err = mock_processor(BatchConfig::default())
        .process_folder(&dir.path().join("nope"), &dir.path().join("out"), null_progress())
        .await
        .unwrap_err();

    assert!(err.is_fatal());
    assert!(matches!(
        err,
        Error::Directory(DirectoryError::InputNotFound { .. })
    ));
}

#[tokio::test]
async fn test_output_folder_is_created() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("a.png"), MockImaging::image_bytes("a")).unwrap();
    let out_dir = output.path().join("deep").join("er");

    let result = mock_processor(BatchConfig::default())
        .process_folder(input.path(), &out_dir, null_progress())
        .await
        .unwrap();

    assert_eq!(result.output_dir, out_dir);
    assert_eq!(count_with_prefix(&out_dir, "a_rotated_"), ROTATIONS_PER_IMAGE);
}
