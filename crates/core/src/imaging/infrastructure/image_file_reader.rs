use std::path::Path;

use crate::imaging::domain::image_reader::ImageReader;
use crate::shared::pixel_buffer::PixelBuffer;

/// Decodes image files with the `image` crate, converting any source pixel
/// format to RGBA8.
pub struct ImageFileReader;

impl ImageFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageReader for ImageFileReader {
    fn read(&self, path: &Path) -> Result<PixelBuffer, Box<dyn std::error::Error>> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();
        log::info!(
            "Image loaded: {width}x{height} pixels from {}",
            path.display()
        );
        Ok(PixelBuffer::new(img.into_raw(), width, height)?)
    }
}
