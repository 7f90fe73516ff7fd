use std::path::Path;

use crate::shared::pixel_buffer::PixelBuffer;

/// Decodes an image file into an RGBA buffer.
pub trait ImageReader: Send {
    fn read(&self, path: &Path) -> Result<PixelBuffer, Box<dyn std::error::Error>>;
}
