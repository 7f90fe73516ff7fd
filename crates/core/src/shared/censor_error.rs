use thiserror::Error;

use crate::shared::region::Region;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CensorError {
    #[error("block size must be a positive integer, got {0}")]
    InvalidBlockSize(i64),
    #[error("pixel data for {width}x{height} RGBA buffer must be {expected} bytes, got {actual}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("region {region:?} does not fit inside {width}x{height} buffer")]
    RegionOutOfBounds {
        region: Region,
        width: u32,
        height: u32,
    },
}
