//! Imaging capability used by the rotation generator
//!
//! The generator only needs three operations from an imaging library:
//! decode bytes into a raster, rotate a raster clockwise onto a canvas of
//! the same size, and encode a raster as PNG. [`ImagingBackend`] captures
//! exactly that, so any imaging library can be plugged in without touching
//! the sweep logic.

mod backend;
pub mod bicubic;

pub use backend::ImageCrateBackend;

use crate::error::ImagingError;

/// Decode / rotate / encode capability
///
/// `rotate_clockwise` borrows its input, so every rotation starts from the
/// raster it was given and implementations can never accumulate resampling
/// error across angles.
pub trait ImagingBackend: Send + Sync {
    /// Decoded in-memory raster
    type Raster: Send;

    /// Decode encoded image bytes into a raster
    fn decode(&self, bytes: &[u8]) -> Result<Self::Raster, ImagingError>;

    /// Rotate clockwise by `degrees` with bicubic resampling
    ///
    /// The output has the same dimensions as the input. Content rotated
    /// past the canvas is clipped and uncovered corners are zero-filled.
    fn rotate_clockwise(
        &self,
        raster: &Self::Raster,
        degrees: f32,
    ) -> Result<Self::Raster, ImagingError>;

    /// Encode a raster as PNG bytes
    fn encode_png(&self, raster: &Self::Raster) -> Result<Vec<u8>, ImagingError>;
}
