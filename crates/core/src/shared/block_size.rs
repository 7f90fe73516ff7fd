use std::fmt;
use std::num::NonZeroU32;

use crate::shared::censor_error::CensorError;
use crate::shared::constants::DEFAULT_BLOCK_SIZE;

/// Edge length, in pixels, of one pixelation block. Always at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockSize(NonZeroU32);

impl BlockSize {
    pub fn new(value: u32) -> Result<Self, CensorError> {
        NonZeroU32::new(value)
            .map(Self)
            .ok_or(CensorError::InvalidBlockSize(0))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Offset from a block's origin to its sample pixel.
    pub fn half(self) -> u32 {
        self.0.get() / 2
    }
}

impl Default for BlockSize {
    fn default() -> Self {
        Self(NonZeroU32::new(DEFAULT_BLOCK_SIZE).unwrap_or(NonZeroU32::MIN))
    }
}

impl TryFrom<i64> for BlockSize {
    type Error = CensorError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(CensorError::InvalidBlockSize(value))
    }
}

impl fmt::Display for BlockSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_zero_is_rejected() {
        assert_eq!(BlockSize::new(0), Err(CensorError::InvalidBlockSize(0)));
    }

    #[rstest]
    #[case::negative(-5)]
    #[case::zero(0)]
    #[case::too_large(i64::from(u32::MAX) + 1)]
    fn test_try_from_rejects(#[case] value: i64) {
        assert_eq!(
            BlockSize::try_from(value),
            Err(CensorError::InvalidBlockSize(value))
        );
    }

    #[test]
    fn test_try_from_accepts_positive() {
        assert_eq!(BlockSize::try_from(12).unwrap().get(), 12);
    }

    #[rstest]
    #[case(1, 0)]
    #[case(2, 1)]
    #[case(5, 2)]
    #[case(10, 5)]
    fn test_half_is_floored(#[case] size: u32, #[case] expected: u32) {
        assert_eq!(BlockSize::new(size).unwrap().half(), expected);
    }

    #[test]
    fn test_default() {
        assert_eq!(BlockSize::default().get(), DEFAULT_BLOCK_SIZE);
    }

    #[test]
    fn test_display() {
        assert_eq!(BlockSize::new(10).unwrap().to_string(), "10px");
    }
}
