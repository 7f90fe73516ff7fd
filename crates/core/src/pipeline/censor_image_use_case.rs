use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::detection::domain::face_detector::FaceDetector;
use crate::imaging::domain::image_reader::ImageReader;
use crate::imaging::domain::image_writer::ImageWriter;
use crate::pipeline::censor_logger::CensorLogger;
use crate::pipeline::censor_session::{CensorOptions, CensorSession};
use crate::pipeline::detection_filter::filter_detections;
use crate::shared::block_size::BlockSize;

/// One requested output: the image censored at `block_size`, written to `path`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderTarget {
    pub block_size: BlockSize,
    pub path: PathBuf,
}

/// What a run did, for callers that report results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CensorSummary {
    pub faces_detected: usize,
    pub regions_censored: usize,
    pub regions_skipped: usize,
    pub images_written: usize,
}

/// Single-image censoring pipeline: read → detect → filter → clip → censor → write.
///
/// The image is decoded and detected once; each render target is rendered
/// from the untouched original.
pub struct CensorImageUseCase {
    reader: Box<dyn ImageReader>,
    writer: Box<dyn ImageWriter>,
    detector: Box<dyn FaceDetector>,
    options: CensorOptions,
    min_confidence: Option<f64>,
    logger: Box<dyn CensorLogger>,
}

impl CensorImageUseCase {
    pub fn new(
        reader: Box<dyn ImageReader>,
        writer: Box<dyn ImageWriter>,
        detector: Box<dyn FaceDetector>,
        options: CensorOptions,
        min_confidence: Option<f64>,
        logger: Box<dyn CensorLogger>,
    ) -> Self {
        Self {
            reader,
            writer,
            detector,
            options,
            min_confidence,
            logger,
        }
    }

    /// Censors `input` with the configured block size and writes `output`.
    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<CensorSummary, Box<dyn std::error::Error>> {
        let target = RenderTarget {
            block_size: self.options.block_size,
            path: output_path.to_path_buf(),
        };
        self.execute_targets(input_path, std::slice::from_ref(&target))
    }

    /// Censors `input` once per target, each rendered from the original.
    pub fn execute_targets(
        &mut self,
        input_path: &Path,
        targets: &[RenderTarget],
    ) -> Result<CensorSummary, Box<dyn std::error::Error>> {
        if targets.is_empty() {
            return Err("No output requested".into());
        }

        let start = Instant::now();
        let buffer = self.reader.read(input_path)?;
        self.logger.timing("decode", elapsed_ms(start));

        self.logger.info("Running face detection...");
        let start = Instant::now();
        let detections = self.detector.detect(&buffer)?;
        let detect_ms = elapsed_ms(start);
        self.logger.timing("detect", detect_ms);
        self.logger.info(&format!(
            "Detection completed in {:.2}s, found {} face(s)",
            detect_ms / 1000.0,
            detections.len()
        ));

        let kept = filter_detections(&detections, self.min_confidence);
        if kept.len() < detections.len() {
            self.logger.info(&format!(
                "Ignoring {} face(s) below confidence threshold",
                detections.len() - kept.len()
            ));
        }

        let mut session = CensorSession::new(buffer, &kept, self.options);
        self.logger.metric("faces", detections.len() as f64);
        self.logger.metric("regions", session.regions().len() as f64);

        let mut written = 0;
        for target in targets {
            let output = session.set_block_size(target.block_size, self.logger.as_mut())?;
            let start = Instant::now();
            self.writer.write(&target.path, &output)?;
            self.logger.timing("encode", elapsed_ms(start));
            written += 1;
        }

        self.logger.summary();

        Ok(CensorSummary {
            faces_detected: detections.len(),
            regions_censored: session.regions().len(),
            regions_skipped: session.skipped(),
            images_written: written,
        })
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
