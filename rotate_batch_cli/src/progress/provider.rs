//! Progress provider implementation for CLI
//!
//! This module provides the CLI-specific implementation of the ProgressProvider trait,
//! which bridges the core library's progress reporting with the CLI's rendering system.

use rotate_batch_core::progress::{ProgressProvider, ProgressUpdate};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Channel capacity; one sweep emits 180 updates
const CHANNEL_CAPACITY: usize = 512;

/// Channel-based progress provider for CLI rendering
///
/// This provider sends progress updates through a channel to a separate
/// rendering task, decoupling the progress reporting from the UI rendering.
/// Rotation jobs run on blocking threads, so sending never waits: when the
/// renderer lags behind, updates are dropped.
pub struct ChannelProvider {
    tx: Mutex<Option<mpsc::Sender<ProgressUpdate>>>,
    name: Option<String>,
}

impl ChannelProvider {
    /// Create a new channel provider
    pub fn new(tx: mpsc::Sender<ProgressUpdate>) -> Self {
        Self {
            tx: Mutex::new(Some(tx)),
            name: None,
        }
    }

    /// Create a new channel provider with a name
    pub fn with_name(tx: mpsc::Sender<ProgressUpdate>, name: String) -> Self {
        Self {
            tx: Mutex::new(Some(tx)),
            name: Some(name),
        }
    }

    fn sender(&self) -> Option<mpsc::Sender<ProgressUpdate>> {
        self.tx.lock().ok().and_then(|guard| guard.as_ref().cloned())
    }
}

impl ProgressProvider for ChannelProvider {
    fn report(&self, update: ProgressUpdate) {
        // Add context if we have a name
        let update = match (&self.name, update) {
            (Some(name), ProgressUpdate::Status { message }) => ProgressUpdate::Status {
                message: format!("[{name}] {message}"),
            },
            (_, other) => other,
        };

        if let Some(tx) = self.sender() {
            let _ = tx.try_send(update);
        }
    }

    fn create_child(&self, name: &str) -> Box<dyn ProgressProvider> {
        let child_name = match &self.name {
            Some(parent_name) => format!("{parent_name}/{name}"),
            None => name.to_string(),
        };
        match self.sender() {
            Some(tx) => Box::new(ChannelProvider::with_name(tx, child_name)),
            None => Box::new(ChannelProvider {
                tx: Mutex::new(None),
                name: Some(child_name),
            }),
        }
    }

    fn complete(&self) {
        // Drop our sender so the renderer can exit its loop
        if let Ok(mut guard) = self.tx.lock() {
            *guard = None;
        }
    }
}

/// Create a progress provider and renderer pair for CLI operations
pub fn create_progress_infrastructure()
-> (Arc<dyn ProgressProvider>, mpsc::Receiver<ProgressUpdate>) {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let provider = Arc::new(ChannelProvider::new(tx)) as Arc<dyn ProgressProvider>;
    (provider, rx)
}
