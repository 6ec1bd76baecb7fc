//! Rotate command orchestrator
//!
//! Builds a batch processor from the loaded configuration, wires progress
//! bars to the terminal when enabled, and renders the batch summary.
//!
//! Without bars the core's own log records are the only per-file output.

use crate::config::AppConfig;
use crate::output::{SummaryFormat, create_formatter};
use crate::progress::{create_progress_infrastructure, render_progress};
use anyhow::Result;
use log::debug;
use rotate_batch_core::{
    BatchProcessor, BatchResult, ImageCrateBackend, ImagingBackend, NullProvider, ProgressProvider,
};
use std::path::Path;
use std::sync::Arc;

/// Orchestrator for the rotate command
pub struct RotateOrchestrator<B = ImageCrateBackend> {
    config: AppConfig,
    processor: BatchProcessor<B>,
    show_progress: bool,
}

impl RotateOrchestrator<ImageCrateBackend> {
    /// Create an orchestrator using the default imaging backend
    pub fn new(config: AppConfig) -> Self {
        Self::with_backend(config, ImageCrateBackend::new())
    }
}

impl<B: ImagingBackend + 'static> RotateOrchestrator<B> {
    /// Create an orchestrator on top of a specific imaging backend
    pub fn with_backend(config: AppConfig, backend: B) -> Self {
        debug!(
            "Creating rotate orchestrator with {} concurrent job(s)",
            config.processing.max_concurrent_jobs
        );
        let processor = BatchProcessor::with_backend(config.processing.clone(), backend);
        let show_progress = config.output.progress_enabled;
        Self {
            config,
            processor,
            show_progress,
        }
    }

    /// Enable or disable terminal progress bars
    ///
    /// Bars are only drawn when progress is also enabled in the configuration.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress && self.config.output.progress_enabled;
        self
    }

    /// Whether progress bars will be drawn
    pub fn shows_progress(&self) -> bool {
        self.show_progress
    }

    /// Active configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Rotate every image of `input_dir` into `output_dir`
    pub async fn run(&self, input_dir: &Path, output_dir: &Path) -> Result<BatchResult> {
        debug!(
            "Rotating images from {} into {}",
            input_dir.display(),
            output_dir.display()
        );

        if !self.show_progress {
            let provider: Arc<dyn ProgressProvider> = Arc::new(NullProvider);
            return Ok(self
                .processor
                .process_folder(input_dir, output_dir, provider)
                .await?);
        }

        let (provider, rx) = create_progress_infrastructure();
        let renderer = tokio::spawn(render_progress(rx));

        let result = self
            .processor
            .process_folder(input_dir, output_dir, Arc::clone(&provider))
            .await;

        // Fatal errors return before the processor completes the provider
        provider.complete();
        drop(provider);
        let _ = renderer.await;

        Ok(result?)
    }

    /// Render the summary in the configured format
    pub fn render_summary(&self, result: &BatchResult) -> Result<String> {
        let output = &self.config.output;
        let list_files =
            output.default_format == SummaryFormat::Text && !self.show_progress;
        create_formatter(output.default_format, output.color_enabled, list_files)
            .format_batch(result)
    }
}
