use std::path::Path;

use crate::imaging::domain::image_writer::ImageWriter;
use crate::shared::pixel_buffer::PixelBuffer;

/// Writes a buffer to an image file using the `image` crate.
///
/// Formats without an alpha channel (e.g. JPEG) are written as RGB.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, buffer: &PixelBuffer) -> Result<(), Box<dyn std::error::Error>> {
        // Ensure parent directory exists (infrastructure concern)
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let img = image::RgbaImage::from_raw(
            buffer.width(),
            buffer.height(),
            buffer.data().to_vec(),
        )
        .ok_or("Failed to create image from buffer data")?;

        let format = image::ImageFormat::from_path(path)?;
        if format == image::ImageFormat::Jpeg {
            image::DynamicImage::ImageRgba8(img).to_rgb8().save(path)?;
        } else {
            img.save(path)?;
        }

        let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        log::info!(
            "Censored image written to {} ({:.2} KB)",
            path.display(),
            size as f64 / 1024.0
        );
        Ok(())
    }
}
