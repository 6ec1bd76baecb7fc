use super::OutputFormatter;
use crate::progress::format_duration;
use anyhow::Result;
use colored::*;
use rotate_batch_core::{BatchResult, JobResult, JobStatus};
use serde_json::{Value, json};

/// Text formatter for human-readable output
pub struct TextFormatter {
    use_color: bool,
    list_files: bool,
}

impl TextFormatter {
    pub fn new(use_color: bool) -> Self {
        Self {
            use_color,
            list_files: false,
        }
    }

    /// Print one line per source image, not just the failures
    pub fn with_file_lines(mut self, list_files: bool) -> Self {
        self.list_files = list_files;
        self
    }

    fn colorize(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn source_name(job: &JobResult) -> String {
        job.source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| job.base_name.clone())
    }

    fn describe_failure(job: &JobResult) -> String {
        match job.status {
            JobStatus::DecodeFailed => "could not be opened".to_string(),
            JobStatus::WriteFailed { angle } => format!(
                "stopped at {angle} degrees after {} file(s)",
                job.files_written
            ),
            JobStatus::Aborted => "worker stopped unexpectedly".to_string(),
            JobStatus::Completed => "completed".to_string(),
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_batch(&self, result: &BatchResult) -> Result<String> {
        let mut output = String::new();

        if self.list_files && !result.jobs.is_empty() {
            for job in &result.jobs {
                let name = Self::source_name(job);
                if job.is_success() {
                    output.push_str(&format!(
                        "{} {name} ({} files)\n",
                        self.colorize("✓", |s| s.green()),
                        job.files_written
                    ));
                } else {
                    output.push_str(&format!(
                        "{} {name}: {}\n",
                        self.colorize("✗", |s| s.red()),
                        Self::describe_failure(job)
                    ));
                }
            }
            output.push('\n');
        }

        output.push_str(&format!("{}\n", self.colorize("Summary:", |s| s.bold().green())));
        output.push_str(&format!(
            "  Successfully processed: {}\n",
            self.colorize(&result.successful.to_string(), |s| s.green())
        ));

        let failed = result.failed.to_string();
        let failed = if result.failed > 0 {
            self.colorize(&failed, |s| s.red())
        } else {
            failed
        };
        output.push_str(&format!("  Failed: {failed}\n"));
        output.push_str(&format!("  Files written: {}\n", result.files_written()));
        output.push_str(&format!(
            "  Output folder: {}\n",
            result.output_dir.display()
        ));
        output.push_str(&format!(
            "  Total time: {}\n",
            format_duration(result.total_time)
        ));

        let failures: Vec<&JobResult> = result.failures().collect();
        if !failures.is_empty() {
            output.push_str(&format!("\n{}\n", self.colorize("Failed images:", |s| s.yellow())));
            for job in failures {
                let name = Self::source_name(job);
                output.push_str(&format!("  {name}: {}\n", Self::describe_failure(job)));
                if let Some(message) = job.error_message() {
                    output.push_str(&format!("    {}\n", self.colorize(&message, |s| s.dimmed())));
                }
            }
        }

        Ok(output)
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn job_to_json(job: &JobResult) -> Value {
        json!({
            "source": job.source_path.to_string_lossy(),
            "base_name": job.base_name,
            "success": job.is_success(),
            "status": job.status,
            "files_written": job.files_written,
            "processing_time_ms": job.processing_time.as_millis() as u64,
            "error": job.error_message(),
        })
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_batch(&self, result: &BatchResult) -> Result<String> {
        let summary = json!({
            "successful": result.successful,
            "failed": result.failed,
            "files_written": result.files_written(),
            "output_dir": result.output_dir.to_string_lossy(),
            "total_time_ms": result.total_time.as_millis() as u64,
            "jobs": result.jobs.iter().map(Self::job_to_json).collect::<Vec<_>>(),
        });

        if self.pretty {
            Ok(serde_json::to_string_pretty(&summary)?)
        } else {
            Ok(serde_json::to_string(&summary)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rotate_batch_core::error::{Error, InternalError};
    use rotate_batch_core::{ROTATIONS_PER_IMAGE, RotationJob};
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    fn completed(name: &str) -> JobResult {
        JobResult {
            source_path: PathBuf::from(format!("/in/{name}")),
            base_name: name.split('.').next().unwrap_or_default().to_string(),
            status: JobStatus::Completed,
            files_written: ROTATIONS_PER_IMAGE,
            error: None,
            processing_time: Duration::from_millis(20),
        }
    }

    fn sample_batch() -> BatchResult {
        let job = RotationJob::new(Path::new("/in/b.png"), Path::new("/out"), "b");
        let aborted = JobResult::aborted(
            &job,
            InternalError::worker_failed("b.png", "panicked"),
            Duration::from_millis(5),
        );
        let mut write_failed = completed("c.jpg");
        write_failed.status = JobStatus::WriteFailed { angle: 40 };
        write_failed.files_written = 20;
        write_failed.error = Some(Error::Internal(InternalError::assertion("disk full")));

        BatchResult {
            successful: 1,
            failed: 2,
            attempted: vec!["a.png".into(), "b.png".into(), "c.jpg".into()],
            jobs: vec![completed("a.png"), aborted, write_failed],
            output_dir: PathBuf::from("/out"),
            total_time: Duration::from_millis(1500),
        }
    }

    #[test]
    fn test_text_summary_reports_counts_and_location() {
        let text = TextFormatter::new(false).format_batch(&sample_batch()).unwrap();

        assert!(text.contains("Successfully processed: 1"));
        assert!(text.contains("Failed: 2"));
        assert!(text.contains("Files written: 200"));
        assert!(text.contains("Output folder: /out"));
        assert!(text.contains("c.jpg: stopped at 40 degrees after 20 file(s)"));
        assert!(!text.contains("a.png"));
    }

    #[test]
    fn test_text_file_lines_list_every_source() {
        let text = TextFormatter::new(false)
            .with_file_lines(true)
            .format_batch(&sample_batch())
            .unwrap();

        assert!(text.contains("✓ a.png (180 files)"));
        assert!(text.contains("✗ b.png: worker stopped unexpectedly"));
    }

    #[test]
    fn test_json_summary_is_machine_readable() {
        let json = JsonFormatter::new(false).format_batch(&sample_batch()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["successful"], 1);
        assert_eq!(value["failed"], 2);
        assert_eq!(value["jobs"].as_array().unwrap().len(), 3);
        assert_eq!(value["jobs"][0]["status"]["state"], "completed");
        assert_eq!(value["jobs"][2]["status"]["state"], "write_failed");
        assert_eq!(value["jobs"][2]["status"]["angle"], 40);
        assert!(value["jobs"][0]["error"].is_null());
    }
}
