use crate::detection::domain::detection::Detection;
use crate::shared::pixel_buffer::PixelBuffer;

/// Domain interface for face detection.
///
/// Implementations may be stateful (e.g. lazily loaded models), hence
/// `&mut self`. Results must already be normalized to [`Detection`].
pub trait FaceDetector: Send {
    fn detect(&mut self, buffer: &PixelBuffer)
        -> Result<Vec<Detection>, Box<dyn std::error::Error>>;
}
