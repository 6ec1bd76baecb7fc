//! Imaging backend built on the `image` crate

use super::ImagingBackend;
use super::bicubic;
use crate::error::ImagingError;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// Default backend: `image` for codecs, [`bicubic`] for resampling.
///
/// Rasters keep the color type they were decoded with. Quarter turns that
/// keep the canvas size (0°, 180°, and 90°/270° on square rasters) are pure
/// pixel remaps and skip interpolation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateBackend;

impl ImageCrateBackend {
    pub fn new() -> Self {
        Self
    }

    fn exact_quarter_turn(raster: &DynamicImage, degrees: f32) -> Option<DynamicImage> {
        let normalized = degrees.rem_euclid(360.0);
        let square = raster.width() == raster.height();
        match normalized {
            d if d == 0.0 => Some(raster.clone()),
            d if d == 180.0 => Some(raster.rotate180()),
            d if d == 90.0 && square => Some(raster.rotate90()),
            d if d == 270.0 && square => Some(raster.rotate270()),
            _ => None,
        }
    }
}

impl ImagingBackend for ImageCrateBackend {
    type Raster = DynamicImage;

    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, ImagingError> {
        image::load_from_memory(bytes).map_err(|e| ImagingError::decode(e.to_string()))
    }

    fn rotate_clockwise(
        &self,
        raster: &DynamicImage,
        degrees: f32,
    ) -> Result<DynamicImage, ImagingError> {
        if !degrees.is_finite() {
            return Err(ImagingError::rotate(degrees, "angle is not a finite number"));
        }

        if let Some(turned) = Self::exact_quarter_turn(raster, degrees) {
            return Ok(turned);
        }

        let rotated = match raster {
            DynamicImage::ImageLuma8(buf) => {
                DynamicImage::ImageLuma8(bicubic::rotate_clockwise(buf, degrees))
            }
            DynamicImage::ImageLumaA8(buf) => {
                DynamicImage::ImageLumaA8(bicubic::rotate_clockwise(buf, degrees))
            }
            DynamicImage::ImageRgb8(buf) => {
                DynamicImage::ImageRgb8(bicubic::rotate_clockwise(buf, degrees))
            }
            DynamicImage::ImageRgba8(buf) => {
                DynamicImage::ImageRgba8(bicubic::rotate_clockwise(buf, degrees))
            }
            DynamicImage::ImageLuma16(buf) => {
                DynamicImage::ImageLuma16(bicubic::rotate_clockwise(buf, degrees))
            }
            DynamicImage::ImageLumaA16(buf) => {
                DynamicImage::ImageLumaA16(bicubic::rotate_clockwise(buf, degrees))
            }
            DynamicImage::ImageRgb16(buf) => {
                DynamicImage::ImageRgb16(bicubic::rotate_clockwise(buf, degrees))
            }
            DynamicImage::ImageRgba16(buf) => {
                DynamicImage::ImageRgba16(bicubic::rotate_clockwise(buf, degrees))
            }
            DynamicImage::ImageRgb32F(buf) => {
                DynamicImage::ImageRgb32F(bicubic::rotate_clockwise(buf, degrees))
            }
            DynamicImage::ImageRgba32F(buf) => {
                DynamicImage::ImageRgba32F(bicubic::rotate_clockwise(buf, degrees))
            }
            other => DynamicImage::ImageRgba8(bicubic::rotate_clockwise(
                &other.to_rgba8(),
                degrees,
            )),
        };

        Ok(rotated)
    }

    fn encode_png(&self, raster: &DynamicImage) -> Result<Vec<u8>, ImagingError> {
        // PNG has no float samples.
        let converted;
        let encodable = match raster {
            DynamicImage::ImageRgb32F(_) => {
                converted = DynamicImage::ImageRgb16(raster.to_rgb16());
                &converted
            }
            DynamicImage::ImageRgba32F(_) => {
                converted = DynamicImage::ImageRgba16(raster.to_rgba16());
                &converted
            }
            other => other,
        };

        let mut bytes = Vec::new();
        encodable
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| ImagingError::encode(e.to_string()))?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage, Rgba, RgbaImage};

    fn encoded(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), format)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_png() {
        let backend = ImageCrateBackend::new();
        let bytes = encoded(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 3, Rgb([1, 2, 3]))),
            ImageFormat::Png,
        );

        let raster = backend.decode(&bytes).unwrap();
        assert_eq!(raster.dimensions(), (4, 3));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let backend = ImageCrateBackend::new();
        let error = backend.decode(b"definitely not an image").unwrap_err();
        assert!(matches!(error, ImagingError::Decode { .. }));
    }

    #[test]
    fn test_rotation_keeps_color_type_and_size() {
        let backend = ImageCrateBackend::new();
        let raster = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 6, Rgba([9, 9, 9, 255])));

        let rotated = backend.rotate_clockwise(&raster, 34.0).unwrap();

        assert_eq!(rotated.dimensions(), (10, 6));
        assert_eq!(rotated.color(), raster.color());
    }

    #[test]
    fn test_quarter_turn_fast_path_matches_remap() {
        let backend = ImageCrateBackend::new();
        let raster = DynamicImage::ImageRgb8(RgbImage::from_fn(5, 5, |x, y| {
            Rgb([(x * 50) as u8, (y * 50) as u8, 0])
        }));

        let rotated = backend.rotate_clockwise(&raster, 90.0).unwrap();

        // Clockwise: source (x, y) lands on (h - 1 - y, x).
        assert_eq!(rotated.get_pixel(4, 0), raster.get_pixel(0, 0));
        assert_eq!(rotated.get_pixel(4, 4), raster.get_pixel(4, 0));
    }

    #[test]
    fn test_non_square_quarter_turn_keeps_canvas() {
        let backend = ImageCrateBackend::new();
        let raster = DynamicImage::ImageRgb8(RgbImage::new(8, 4));

        let rotated = backend.rotate_clockwise(&raster, 270.0).unwrap();

        assert_eq!(rotated.dimensions(), (8, 4));
    }

    #[test]
    fn test_non_finite_angle_is_rejected() {
        let backend = ImageCrateBackend::new();
        let raster = DynamicImage::ImageRgb8(RgbImage::new(2, 2));

        let error = backend.rotate_clockwise(&raster, f32::NAN).unwrap_err();
        assert!(matches!(error, ImagingError::Rotate { .. }));
    }

    #[test]
    fn test_encode_png_roundtrips_float_rasters() {
        let backend = ImageCrateBackend::new();
        let raster = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 3, Rgb([255, 0, 0])));
        let float = DynamicImage::ImageRgb32F(raster.to_rgb32f());

        let bytes = backend.encode_png(&float).unwrap();
        let decoded = backend.decode(&bytes).unwrap();

        assert_eq!(decoded.dimensions(), (3, 3));
        assert_eq!(decoded.to_rgb8().get_pixel(1, 1), &Rgb([255, 0, 0]));
    }
}
