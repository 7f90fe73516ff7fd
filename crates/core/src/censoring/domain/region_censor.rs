use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::censor_error::CensorError;
use crate::shared::pixel_buffer::PixelBuffer;
use crate::shared::region::Region;

/// Block-completion callback: `(blocks_done, blocks_total)` across one pass.
pub type ProgressFn<'a> = &'a mut dyn FnMut(usize, usize);

/// How overlapping regions in one pass see each other's writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapMode {
    /// Regions run in input order against the same buffer, so a later region
    /// samples pixels an earlier overlapping region already censored.
    #[default]
    Compound,
    /// Every region samples from the buffer as it was before the pass began.
    Isolated,
}

impl OverlapMode {
    pub const ALL: &[OverlapMode] = &[OverlapMode::Compound, OverlapMode::Isolated];
}

impl fmt::Display for OverlapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlapMode::Compound => write!(f, "compound"),
            OverlapMode::Isolated => write!(f, "isolated"),
        }
    }
}

impl FromStr for OverlapMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compound" => Ok(OverlapMode::Compound),
            "isolated" => Ok(OverlapMode::Isolated),
            other => Err(format!(
                "Overlap mode must be 'compound' or 'isolated', got '{other}'"
            )),
        }
    }
}

/// Domain interface for censoring regions of a buffer.
///
/// Implementations modify the buffer in place and must not touch pixels
/// outside the given regions. All regions are validated against the buffer
/// before any pixel is written.
pub trait RegionCensor: Send {
    fn censor(
        &self,
        buffer: &mut PixelBuffer,
        regions: &[Region],
        mode: OverlapMode,
        progress: Option<ProgressFn<'_>>,
    ) -> Result<(), CensorError>;
}
