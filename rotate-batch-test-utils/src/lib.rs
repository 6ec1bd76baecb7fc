//! Test utilities for rotate-batch
//!
//! This crate provides image fixtures, a mock imaging backend with failure
//! injection and a recording progress provider.

pub mod builders;
pub mod mocks;

// Re-export commonly used types
pub use builders::{TestImageBuilder, fixtures};
pub use mocks::{MockImaging, MockRaster, RecordingProvider};
