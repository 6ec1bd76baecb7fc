//! Progress rendering for the CLI
//!
//! This module handles the visual rendering of progress updates,
//! converting ProgressUpdate messages into terminal output.

use colored::*;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use rotate_batch_core::progress::ProgressUpdate;
use std::collections::HashMap;
use tokio::sync::mpsc;

/// Render progress updates from a channel
pub async fn render_progress(mut rx: mpsc::Receiver<ProgressUpdate>) {
    let mut renderer = ProgressRenderer::new();

    while let Some(update) = rx.recv().await {
        renderer.handle_update(update);
    }

    renderer.finish();
}

/// Progress renderer that manages one bar per running job
pub struct ProgressRenderer {
    multi: MultiProgress,
    job_bars: HashMap<String, ProgressBar>,
    total_files: usize,
    finished: usize,
    failed: usize,
}

impl ProgressRenderer {
    /// Create a new progress renderer
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            job_bars: HashMap::new(),
            total_files: 0,
            finished: 0,
            failed: 0,
        }
    }

    /// Files finished so far (successful or not)
    pub fn finished(&self) -> usize {
        self.finished
    }

    /// Files that failed so far
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Number of bars still on screen
    pub fn active_jobs(&self) -> usize {
        self.job_bars.len()
    }

    /// Handle a progress update
    pub fn handle_update(&mut self, update: ProgressUpdate) {
        match update {
            ProgressUpdate::BatchStarted { total_files } => {
                self.total_files = total_files;
                self.println(format!(
                    "{} {} image(s)",
                    "Rotating".bold(),
                    total_files.to_string().cyan()
                ));
            }

            ProgressUpdate::JobStarted {
                index,
                total,
                file_name,
                total_rotations,
            } => {
                self.start_job(index, total, file_name, total_rotations);
            }

            ProgressUpdate::RotationSaved {
                file_name, angle, ..
            } => {
                if let Some(bar) = self.job_bars.get(&file_name) {
                    bar.inc(1);
                    bar.set_prefix(format!("{angle:03}°"));
                }
            }

            ProgressUpdate::JobFinished {
                file_name,
                success,
                files_written,
                message,
            } => {
                self.finish_job(file_name, success, files_written, message);
            }

            ProgressUpdate::Status { message } => {
                self.println(format!("{} {}", "→".green(), message));
            }
        }
    }

    fn start_job(&mut self, index: usize, total: usize, file_name: String, total_rotations: usize) {
        let bar = self.multi.add(ProgressBar::new(total_rotations as u64));
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{msg}\n[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rotations | {prefix}")
        {
            bar.set_style(style.progress_chars("##-"));
        }
        bar.set_message(format!(
            "{} [{index}/{total}]: {}",
            "Processing".bold(),
            file_name.cyan()
        ));
        self.job_bars.insert(file_name, bar);
    }

    fn finish_job(
        &mut self,
        file_name: String,
        success: bool,
        files_written: usize,
        message: Option<String>,
    ) {
        self.finished += 1;
        if let Some(bar) = self.job_bars.remove(&file_name) {
            bar.finish_and_clear();
            self.multi.remove(&bar);
        }

        let line = if success {
            format!("{} {file_name} ({files_written} files)", "✓".green())
        } else {
            self.failed += 1;
            format!(
                "{} {file_name}: {}",
                "✗".red(),
                message.unwrap_or_else(|| "failed".to_string())
            )
        };
        self.println(line);
    }

    fn println(&self, line: String) {
        if self.multi.println(&line).is_err() {
            eprintln!("{line}");
        }
    }

    /// Finish all progress bars
    pub fn finish(self) {
        for (_, bar) in self.job_bars {
            bar.abandon();
        }

        if self.total_files > 0 {
            let done = format!("{}/{} image(s) processed", self.finished, self.total_files);
            if self.failed == 0 {
                eprintln!("{} {}", "✓".green(), done);
            } else {
                eprintln!("{} {} ({} failed)", "!".yellow(), done, self.failed);
            }
        }
    }
}

impl Default for ProgressRenderer {
    fn default() -> Self {
        Self::new()
    }
}
