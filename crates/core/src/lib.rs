//! Region pixelation engine for censoring detected faces in still images.
//!
//! Detector rectangles are clipped to pixel-aligned [`Region`]s by
//! [`region_clipper`], then each region is overwritten with a block-quantized
//! copy of itself by a [`RegionCensor`] such as [`BlockPixelator`].
//! [`CensorSession`] keeps the decoded original so re-rendering with a new
//! block size never compounds passes.
//!
//! [`Region`]: shared::region::Region
//! [`region_clipper`]: censoring::domain::region_clipper
//! [`RegionCensor`]: censoring::domain::region_censor::RegionCensor
//! [`BlockPixelator`]: censoring::infrastructure::block_pixelator::BlockPixelator
//! [`CensorSession`]: pipeline::censor_session::CensorSession

pub mod censoring;
pub mod detection;
pub mod imaging;
pub mod pipeline;
pub mod shared;
