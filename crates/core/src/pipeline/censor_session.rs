use std::sync::Arc;
use std::time::Instant;

use crate::censoring::domain::region_censor::OverlapMode;
use crate::censoring::domain::region_clipper::clip_all;
use crate::censoring::infrastructure::censor_factory::{create_censor, CensorMethod};
use crate::detection::domain::detection::Detection;
use crate::pipeline::censor_logger::CensorLogger;
use crate::shared::block_size::BlockSize;
use crate::shared::censor_error::CensorError;
use crate::shared::pixel_buffer::PixelBuffer;
use crate::shared::region::Region;

/// Parameters for one censoring render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CensorOptions {
    pub method: CensorMethod,
    pub block_size: BlockSize,
    pub overlap: OverlapMode,
}

/// Censoring state for one loaded image.
///
/// Keeps the decoded original immutable and renders every pass into a fresh
/// copy, so changing the block size never stacks one pixelation on another.
/// A render is published as a new `Arc` only once the whole pass completes;
/// holders of an earlier output never observe a partial write.
pub struct CensorSession {
    original: Arc<PixelBuffer>,
    regions: Vec<Region>,
    skipped: usize,
    options: CensorOptions,
    output: Option<Arc<PixelBuffer>>,
}

impl CensorSession {
    /// Clips every detection against the image once; regions stay fixed for
    /// the session's lifetime.
    pub fn new(original: PixelBuffer, detections: &[Detection], options: CensorOptions) -> Self {
        let regions = clip_all(
            detections.iter().map(|d| &d.rectangle),
            original.width(),
            original.height(),
        );
        let skipped = detections.len() - regions.len();
        if skipped > 0 {
            log::info!("{skipped} detection(s) fall outside the image and will not be censored");
        }

        let overlaps = count_overlaps(&regions);
        if overlaps > 0 {
            log::debug!(
                "{overlaps} overlapping region pair(s); overlap mode is {}",
                options.overlap
            );
        }

        Self {
            original: Arc::new(original),
            regions,
            skipped,
            options,
            output: None,
        }
    }

    pub fn original(&self) -> &Arc<PixelBuffer> {
        &self.original
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Detections that produced no region.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn options(&self) -> CensorOptions {
        self.options
    }

    /// Most recently published render, if any.
    pub fn output(&self) -> Option<Arc<PixelBuffer>> {
        self.output.clone()
    }

    /// Renders the current options from the original and publishes the result.
    pub fn render(
        &mut self,
        logger: &mut dyn CensorLogger,
    ) -> Result<Arc<PixelBuffer>, CensorError> {
        let CensorOptions {
            method,
            block_size,
            overlap,
        } = self.options;
        logger.info(&format!(
            "Applying {method} to {} face(s) with block size {block_size}",
            self.regions.len()
        ));

        let start = Instant::now();
        let mut scratch = PixelBuffer::clone(&self.original);
        let censor = create_censor(method, block_size);
        let mut on_progress = |done: usize, total: usize| logger.progress(done, total);
        censor.censor(&mut scratch, &self.regions, overlap, Some(&mut on_progress))?;
        logger.timing("censor", start.elapsed().as_secs_f64() * 1000.0);

        let published = Arc::new(scratch);
        self.output = Some(published.clone());
        Ok(published)
    }

    /// Re-render command for a block size change. Always replays against the
    /// original, never the previous output.
    pub fn set_block_size(
        &mut self,
        block_size: BlockSize,
        logger: &mut dyn CensorLogger,
    ) -> Result<Arc<PixelBuffer>, CensorError> {
        if self.output.is_some() && block_size != self.options.block_size {
            log::info!("Re-applying censor with new block size: {block_size}");
        }
        self.options.block_size = block_size;
        self.render(logger)
    }
}

fn count_overlaps(regions: &[Region]) -> usize {
    regions
        .iter()
        .enumerate()
        .map(|(i, a)| regions[i + 1..].iter().filter(|b| a.intersects(b)).count())
        .sum()
}
