use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::censoring::domain::region_censor::RegionCensor;
use crate::shared::block_size::BlockSize;

use super::block_pixelator::BlockPixelator;

/// Censoring strategy applied to each detected region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CensorMethod {
    #[default]
    Pixelation,
}

impl CensorMethod {
    pub const ALL: &[CensorMethod] = &[CensorMethod::Pixelation];
}

impl fmt::Display for CensorMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CensorMethod::Pixelation => write!(f, "pixelation"),
        }
    }
}

impl FromStr for CensorMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CensorMethod::ALL
            .iter()
            .find(|m| m.to_string() == s)
            .copied()
            .ok_or_else(|| format!("Censor method must be 'pixelation', got '{s}'"))
    }
}

/// Creates the censor for `method` at the given intensity.
pub fn create_censor(method: CensorMethod, block_size: BlockSize) -> Box<dyn RegionCensor> {
    log::debug!("Using {method} censor (block_size={block_size})");
    match method {
        CensorMethod::Pixelation => Box::new(BlockPixelator::new(block_size)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::censoring::domain::region_censor::OverlapMode;
    use crate::shared::pixel_buffer::PixelBuffer;
    use crate::shared::region::Region;

    #[test]
    fn test_create_pixelation_censor_works() {
        let censor = create_censor(CensorMethod::Pixelation, BlockSize::new(5).unwrap());
        let mut buffer = PixelBuffer::filled(20, 20, [128, 128, 128, 255]);
        censor
            .censor(&mut buffer, &[], OverlapMode::Compound, None)
            .unwrap();
    }

    #[test]
    fn test_factory_censor_actually_pixelates() {
        let censor = create_censor(CensorMethod::Pixelation, BlockSize::new(4).unwrap());
        let mut buffer = PixelBuffer::filled(8, 8, [0, 0, 0, 255]);
        buffer.set_pixel(2, 2, [255, 255, 255, 255]);

        censor
            .censor(
                &mut buffer,
                &[Region::new(0, 0, 4, 4)],
                OverlapMode::Compound,
                None,
            )
            .unwrap();

        // The block's sample spreads to its top-left corner.
        assert_eq!(buffer.pixel(0, 0), [255, 255, 255, 255]);
        // The neighbouring block is untouched.
        assert_eq!(buffer.pixel(4, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn test_parse_method() {
        assert_eq!(
            "pixelation".parse::<CensorMethod>(),
            Ok(CensorMethod::Pixelation)
        );
        assert!("blur".parse::<CensorMethod>().is_err());
    }

    #[test]
    fn test_default_is_pixelation() {
        assert_eq!(CensorMethod::default(), CensorMethod::Pixelation);
    }
}
