//! Progress reporting module for the CLI
//!
//! This module provides progress reporting infrastructure for the CLI,
//! including providers and renderers.

pub mod provider;
pub mod renderer;
pub mod utils;

// Re-export main helpers
pub use provider::{ChannelProvider, create_progress_infrastructure};
pub use renderer::{ProgressRenderer, render_progress};
pub use utils::format_duration;
