use std::path::Path;

use crate::shared::pixel_buffer::PixelBuffer;

/// Encodes an RGBA buffer to an image file.
pub trait ImageWriter: Send {
    /// Writes `buffer` to `path`; the format follows the file extension.
    fn write(&self, path: &Path, buffer: &PixelBuffer) -> Result<(), Box<dyn std::error::Error>>;
}
