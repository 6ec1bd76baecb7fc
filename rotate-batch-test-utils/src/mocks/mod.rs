//! Mock implementations for testing

mod imaging;
mod progress;

pub use imaging::{MOCK_IMAGE_MAGIC, MockImaging, MockRaster};
pub use progress::RecordingProvider;
