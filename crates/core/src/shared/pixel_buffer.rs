use ndarray::{ArrayView3, ArrayViewMut3};

use crate::shared::censor_error::CensorError;
use crate::shared::constants::RGBA_CHANNELS;

/// A decoded image: contiguous RGBA bytes in row-major order, no row padding.
///
/// Dimensions are fixed at construction. Decoding and encoding happen at I/O
/// boundaries only; the censoring layer reads and writes raw pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Result<Self, CensorError> {
        let expected = (width as usize) * (height as usize) * RGBA_CHANNELS;
        if data.len() != expected {
            return Err(CensorError::BufferSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Buffer of the given size with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = (width as usize) * (height as usize);
        let data = rgba.iter().copied().cycle().take(pixels * RGBA_CHANNELS).collect();
        Self {
            data,
            width,
            height,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA value at `(x, y)`. Panics if the coordinate is outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = self.offset(x, y);
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.data[idx..idx + RGBA_CHANNELS]);
        rgba
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let idx = self.offset(x, y);
        self.data[idx..idx + RGBA_CHANNELS].copy_from_slice(&rgba);
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("PixelBuffer data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("PixelBuffer data length must match dimensions")
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} buffer",
            self.width,
            self.height
        );
        ((y as usize) * (self.width as usize) + (x as usize)) * RGBA_CHANNELS
    }

    fn shape(&self) -> (usize, usize, usize) {
        (self.height as usize, self.width as usize, RGBA_CHANNELS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 16]; // 2x2x4
        let buffer = PixelBuffer::new(data.clone(), 2, 2).unwrap();
        assert_eq!(buffer.width(), 2);
        assert_eq!(buffer.height(), 2);
        assert_eq!(buffer.data(), &data[..]);
    }

    #[test]
    fn test_mismatched_data_length_is_rejected() {
        let err = PixelBuffer::new(vec![0u8; 12], 2, 2).unwrap_err();
        assert!(matches!(
            err,
            CensorError::BufferSize {
                expected: 16,
                actual: 12,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_sized_buffer_is_valid() {
        let buffer = PixelBuffer::new(Vec::new(), 0, 0).unwrap();
        assert!(buffer.data().is_empty());
    }

    #[test]
    fn test_filled_sets_every_pixel() {
        let buffer = PixelBuffer::filled(3, 2, [1, 2, 3, 4]);
        assert_eq!(buffer.data().len(), 24);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(buffer.pixel(x, y), [1, 2, 3, 4]);
            }
        }
    }

    #[test]
    fn test_set_pixel_is_row_major() {
        let mut buffer = PixelBuffer::filled(3, 2, [0, 0, 0, 0]);
        buffer.set_pixel(1, 1, [9, 8, 7, 6]);
        let idx = (3 + 1) * 4;
        assert_eq!(&buffer.data()[idx..idx + 4], &[9, 8, 7, 6]);
        assert_eq!(buffer.pixel(1, 1), [9, 8, 7, 6]);
    }

    #[test]
    #[should_panic(expected = "outside 2x2 buffer")]
    fn test_pixel_out_of_bounds_panics() {
        let buffer = PixelBuffer::filled(2, 2, [0, 0, 0, 255]);
        buffer.pixel(2, 0);
    }

    #[test]
    fn test_clone_is_independent() {
        let buffer = PixelBuffer::filled(2, 2, [100, 100, 100, 255]);
        let mut cloned = buffer.clone();
        cloned.set_pixel(0, 0, [0, 100, 100, 255]);
        assert_eq!(buffer.data()[0], 100);
        assert_eq!(cloned.data()[0], 0);
    }

    #[test]
    fn test_as_ndarray_shape() {
        let buffer = PixelBuffer::filled(4, 2, [0, 0, 0, 0]);
        assert_eq!(buffer.as_ndarray().shape(), &[2, 4, 4]); // (height, width, channels)
    }

    #[test]
    fn test_as_ndarray_mut_modification() {
        let mut buffer = PixelBuffer::filled(2, 2, [0, 0, 0, 0]);
        {
            let mut arr = buffer.as_ndarray_mut();
            arr[[0, 1, 3]] = 128; // row=0, col=1, A channel
        }
        assert_eq!(buffer.pixel(1, 0), [0, 0, 0, 128]);
    }
}
