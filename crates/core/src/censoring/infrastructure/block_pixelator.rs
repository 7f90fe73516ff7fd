use ndarray::{aview1, s};

use crate::censoring::domain::region_censor::{OverlapMode, ProgressFn, RegionCensor};
use crate::shared::block_size::BlockSize;
use crate::shared::censor_error::CensorError;
use crate::shared::pixel_buffer::PixelBuffer;
use crate::shared::region::Region;

/// Replaces each region with a grid of flat-colored blocks.
///
/// Blocks are `block_size` squares anchored at the region origin; the last
/// column and row are truncated at the region edge. Each block is filled with
/// all four channels of one sample pixel taken at `origin + block_size / 2`,
/// clamped to the region's last column/row. Blocks are visited row-major.
pub struct BlockPixelator {
    block_size: BlockSize,
}

impl BlockPixelator {
    pub fn new(block_size: BlockSize) -> Self {
        Self { block_size }
    }

    pub fn block_size(&self) -> BlockSize {
        self.block_size
    }

    /// Pixelates a single region, sampling from the buffer itself.
    pub fn pixelate(&self, buffer: &mut PixelBuffer, region: &Region) -> Result<(), CensorError> {
        self.censor(
            buffer,
            std::slice::from_ref(region),
            OverlapMode::Compound,
            None,
        )
    }

    /// Fills every block of `region` in `target`. Samples come from `source`
    /// when given, otherwise from `target` as it stands.
    fn fill_region(
        &self,
        target: &mut PixelBuffer,
        source: Option<&PixelBuffer>,
        region: &Region,
        mut on_block: impl FnMut(),
    ) {
        let size = self.block_size.get();
        let half = self.block_size.half();
        let right = region.right();
        let bottom = region.bottom();
        let source_view = source.map(PixelBuffer::as_ndarray);
        let mut view = target.as_ndarray_mut();

        for by in (region.y..bottom).step_by(size as usize) {
            let block_bottom = by.saturating_add(size).min(bottom);
            let sy = by.saturating_add(half).min(bottom - 1);

            for bx in (region.x..right).step_by(size as usize) {
                let block_right = bx.saturating_add(size).min(right);
                let sx = bx.saturating_add(half).min(right - 1);

                let px = match &source_view {
                    Some(src) => src.slice(s![sy as usize, sx as usize, ..]),
                    None => view.slice(s![sy as usize, sx as usize, ..]),
                };
                let sample = [px[0], px[1], px[2], px[3]];

                view.slice_mut(s![
                    by as usize..block_bottom as usize,
                    bx as usize..block_right as usize,
                    ..
                ])
                .assign(&aview1(&sample));

                on_block();
            }
        }
    }
}

impl Default for BlockPixelator {
    fn default() -> Self {
        Self::new(BlockSize::default())
    }
}

impl RegionCensor for BlockPixelator {
    fn censor(
        &self,
        buffer: &mut PixelBuffer,
        regions: &[Region],
        mode: OverlapMode,
        mut progress: Option<ProgressFn<'_>>,
    ) -> Result<(), CensorError> {
        let (width, height) = (buffer.width(), buffer.height());
        if let Some(bad) = regions.iter().find(|r| !r.fits_within(width, height)) {
            return Err(CensorError::RegionOutOfBounds {
                region: *bad,
                width,
                height,
            });
        }

        let size = self.block_size.get();
        let total: usize = regions.iter().map(|r| r.block_count(size)).sum();

        // Blocks within one region never overlap, so a snapshot only matters
        // when there is more than one region.
        let pristine = match mode {
            OverlapMode::Isolated if regions.len() > 1 => Some(buffer.clone()),
            _ => None,
        };

        let mut done = 0usize;
        for (i, region) in regions.iter().enumerate() {
            log::debug!(
                "Pixelating region {}/{} {:?} with {} blocks of {}",
                i + 1,
                regions.len(),
                region,
                region.block_count(size),
                self.block_size
            );
            self.fill_region(buffer, pristine.as_ref(), region, || {
                done += 1;
                if let Some(cb) = progress.as_deref_mut() {
                    cb(done, total);
                }
            });
        }

        Ok(())
    }
}
