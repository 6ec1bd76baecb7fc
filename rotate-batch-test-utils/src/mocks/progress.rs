//! Progress provider that records every update

use rotate_batch_core::{ProgressProvider, ProgressUpdate};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Records updates from itself and all of its children in one shared log
#[derive(Debug, Clone, Default)]
pub struct RecordingProvider {
    updates: Arc<Mutex<Vec<ProgressUpdate>>>,
    completions: Arc<AtomicUsize>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all updates received so far
    pub fn updates(&self) -> Vec<ProgressUpdate> {
        self.updates.lock().unwrap().clone()
    }

    /// Angles reported as saved for one source file, in report order
    pub fn saved_angles(&self, file_name: &str) -> Vec<u16> {
        self.updates()
            .into_iter()
            .filter_map(|update| match update {
                ProgressUpdate::RotationSaved {
                    file_name: name,
                    angle,
                    ..
                } if name == file_name => Some(angle),
                _ => None,
            })
            .collect()
    }

    /// `(file name, success)` of every finished job, in report order
    pub fn finished_jobs(&self) -> Vec<(String, bool)> {
        self.updates()
            .into_iter()
            .filter_map(|update| match update {
                ProgressUpdate::JobFinished {
                    file_name, success, ..
                } => Some((file_name, success)),
                _ => None,
            })
            .collect()
    }

    /// Number of `complete` calls on this provider and its children
    pub fn completions(&self) -> usize {
        self.completions.load(Ordering::SeqCst)
    }
}

impl ProgressProvider for RecordingProvider {
    fn report(&self, update: ProgressUpdate) {
        self.updates.lock().unwrap().push(update);
    }

    fn create_child(&self, _name: &str) -> Box<dyn ProgressProvider> {
        Box::new(self.clone())
    }

    fn complete(&self) {
        self.completions.fetch_add(1, Ordering::SeqCst);
    }
}
