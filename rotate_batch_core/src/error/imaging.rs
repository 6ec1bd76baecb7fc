//! Imaging backend error types

use thiserror::Error;

/// Errors raised by an imaging backend
#[derive(Error, Debug)]
pub enum ImagingError {
    /// The bytes are not a decodable raster
    #[error("Failed to decode image: {message}")]
    Decode { message: String },

    /// The raster could not be PNG-encoded
    #[error("Failed to encode image as PNG: {message}")]
    Encode { message: String },

    /// Resampling produced no raster
    #[error("Failed to rotate image by {degrees} degrees: {message}")]
    Rotate { degrees: f32, message: String },
}

impl ImagingError {
    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an encode error
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Create a rotate error
    pub fn rotate(degrees: f32, message: impl Into<String>) -> Self {
        Self::Rotate {
            degrees,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error() {
        let error = ImagingError::decode("unsupported format");
        assert!(error.to_string().contains("decode"));
        assert!(error.to_string().contains("unsupported format"));
    }

    #[test]
    fn test_rotate_error_mentions_angle() {
        let error = ImagingError::rotate(42.0, "raster size mismatch");
        assert!(error.to_string().contains("42"));
        assert!(error.to_string().contains("raster size mismatch"));
    }
}
