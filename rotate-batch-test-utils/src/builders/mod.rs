//! Builders for on-disk test fixtures

mod test_images;

pub use test_images::{TestImageBuilder, fixtures};
