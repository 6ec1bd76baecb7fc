//! Mock imaging backend with failure injection

use rotate_batch_core::{ImagingBackend, error::ImagingError};
use std::sync::Mutex;

/// Leading bytes the mock accepts as a decodable image
pub const MOCK_IMAGE_MAGIC: &[u8] = b"MOCKIMG";

/// Raster produced by [`MockImaging`]
#[derive(Debug, Clone, PartialEq)]
pub struct MockRaster {
    /// Bytes the raster was decoded from
    pub source: Vec<u8>,
    /// Rotation applied to produce this raster, `None` for the original
    pub rotated_by: Option<f32>,
}

/// Imaging backend that never touches real pixels
///
/// Decoding succeeds for input starting with [`MOCK_IMAGE_MAGIC`]. Encoding
/// can be made to fail at one angle to simulate a write failure mid-sweep.
#[derive(Debug, Default)]
pub struct MockImaging {
    fail_decode: bool,
    fail_encode_at: Option<f32>,
    decode_calls: Mutex<usize>,
    rotations: Mutex<Vec<MockRaster>>,
}

impl MockImaging {
    /// Create a mock that decodes and encodes successfully
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every decode fail
    pub fn failing_decode(mut self) -> Self {
        self.fail_decode = true;
        self
    }

    /// Make encoding fail for the rotation at `angle`
    pub fn failing_encode_at(mut self, angle: u16) -> Self {
        self.fail_encode_at = Some(f32::from(angle));
        self
    }

    /// Bytes that the mock decodes successfully
    pub fn image_bytes(label: &str) -> Vec<u8> {
        let mut bytes = MOCK_IMAGE_MAGIC.to_vec();
        bytes.extend_from_slice(label.as_bytes());
        bytes
    }

    /// Number of decode calls so far
    pub fn decode_calls(&self) -> usize {
        *self.decode_calls.lock().unwrap()
    }

    /// Inputs of every rotation so far, in call order
    pub fn rotation_inputs(&self) -> Vec<MockRaster> {
        self.rotations.lock().unwrap().clone()
    }
}

impl ImagingBackend for MockImaging {
    type Raster = MockRaster;

    fn decode(&self, bytes: &[u8]) -> Result<MockRaster, ImagingError> {
        *self.decode_calls.lock().unwrap() += 1;
        if self.fail_decode || !bytes.starts_with(MOCK_IMAGE_MAGIC) {
            return Err(ImagingError::decode("mock: unrecognized image data"));
        }
        Ok(MockRaster {
            source: bytes.to_vec(),
            rotated_by: None,
        })
    }

    fn rotate_clockwise(&self, raster: &MockRaster, degrees: f32) -> Result<MockRaster, ImagingError> {
        self.rotations.lock().unwrap().push(raster.clone());
        Ok(MockRaster {
            source: raster.source.clone(),
            rotated_by: Some(degrees),
        })
    }

    fn encode_png(&self, raster: &MockRaster) -> Result<Vec<u8>, ImagingError> {
        if raster.rotated_by.is_some() && raster.rotated_by == self.fail_encode_at {
            return Err(ImagingError::encode("mock: injected encode failure"));
        }
        let mut bytes = raster.source.clone();
        bytes.extend_from_slice(format!("@{}", raster.rotated_by.unwrap_or_default()).as_bytes());
        Ok(bytes)
    }
}
