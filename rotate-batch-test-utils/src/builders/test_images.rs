//! Test image builders for creating input folders

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use rotate_batch_core::{
    Error, Result,
    error::{ImagingError, IoError},
};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Builder writing image fixtures into a directory
pub struct TestImageBuilder {
    base_dir: PathBuf,
    generated_files: Vec<PathBuf>,
}

impl TestImageBuilder {
    /// Create a new builder writing into `base_dir`
    pub fn new(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            generated_files: Vec::new(),
        }
    }

    /// Write a gradient image; the format follows the file extension
    pub fn generate_image(&mut self, name: &str, width: u32, height: u32) -> Result<PathBuf> {
        let image = DynamicImage::ImageRgb8(fixtures::gradient_image(width, height));
        self.save(name, &image)
    }

    /// Write a square black image with a white block in its top-left corner
    pub fn generate_marker_image(&mut self, name: &str, size: u32) -> Result<PathBuf> {
        let image = DynamicImage::ImageRgb8(fixtures::marker_image(size));
        self.save(name, &image)
    }

    /// Write bytes that carry an image extension but decode to nothing
    pub fn generate_corrupted_file(&mut self, name: &str, size: usize) -> Result<PathBuf> {
        let content: Vec<u8> = (0..size)
            .map(|i| match i % 4 {
                0 => 0xFF,
                1 => 0x00,
                2 => (i & 0xFF) as u8,
                _ => 0xAA,
            })
            .collect();
        self.write_bytes(name, &content)
    }

    /// Write a plain file that discovery should ignore
    pub fn generate_text_file(&mut self, name: &str, content: &str) -> Result<PathBuf> {
        self.write_bytes(name, content.as_bytes())
    }

    /// Write raw bytes
    pub fn write_bytes(&mut self, name: &str, content: &[u8]) -> Result<PathBuf> {
        let file_path = self.base_dir.join(name);
        std::fs::write(&file_path, content)
            .map_err(|e| Error::Io(IoError::from_std(e).with_path(&file_path)))?;
        self.generated_files.push(file_path.clone());
        Ok(file_path)
    }

    /// Files written so far
    pub fn generated_files(&self) -> &[PathBuf] {
        &self.generated_files
    }

    fn save(&mut self, name: &str, image: &DynamicImage) -> Result<PathBuf> {
        let file_path = self.base_dir.join(name);
        let format = ImageFormat::from_path(&file_path)
            .map_err(|e| Error::Imaging(ImagingError::encode(e.to_string())))?;
        let bytes = fixtures::encode(image, format)?;
        self.write_bytes(name, &bytes)
    }

    /// Remove all generated files
    pub fn cleanup(&mut self) {
        for file_path in &self.generated_files {
            let _ = std::fs::remove_file(file_path);
        }
        self.generated_files.clear();
    }
}

impl Drop for TestImageBuilder {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// In-memory fixtures
pub mod fixtures {
    use super::*;

    /// Edge length of the marker block drawn by [`marker_image`]
    pub const MARKER_SIZE: u32 = 4;

    /// Smooth RGB gradient, distinct in both axes
    pub fn gradient_image(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let r = (x * 255 / width.max(1)) as u8;
            let g = (y * 255 / height.max(1)) as u8;
            Rgb([r, g, 128])
        })
    }

    /// Square black image with a white block in the top-left corner
    pub fn marker_image(size: u32) -> RgbImage {
        RgbImage::from_fn(size, size, |x, y| {
            if x < MARKER_SIZE && y < MARKER_SIZE {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        })
    }

    /// Encode an image in the given format
    pub fn encode(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), format)
            .map_err(|e| Error::Imaging(ImagingError::encode(e.to_string())))?;
        Ok(bytes)
    }
}
