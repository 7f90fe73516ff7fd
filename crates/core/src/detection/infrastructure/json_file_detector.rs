use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::detection::domain::detection::{normalize_records, Detection, DetectionRecord};
use crate::detection::domain::detection_error::DetectionError;
use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::pixel_buffer::PixelBuffer;

/// Replays detector output saved as JSON.
///
/// Accepts either a bare array of records or an object with a `detections`
/// array. Each record may use the flat or the nested box layout; records
/// without a box are dropped with a warning.
pub struct JsonFileDetector {
    detections: Vec<Detection>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DetectionFile {
    Bare(Vec<DetectionRecord>),
    Wrapped { detections: Vec<DetectionRecord> },
}

impl JsonFileDetector {
    pub fn open(path: &Path) -> Result<Self, DetectionError> {
        let json = fs::read_to_string(path).map_err(|source| DetectionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Reading detections from {}", path.display());
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, DetectionError> {
        let records = match serde_json::from_str(json).map_err(DetectionError::Parse)? {
            DetectionFile::Bare(records) => records,
            DetectionFile::Wrapped { detections } => detections,
        };
        Ok(Self {
            detections: normalize_records(records),
        })
    }

    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }
}

impl FaceDetector for JsonFileDetector {
    fn detect(
        &mut self,
        buffer: &PixelBuffer,
    ) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        log::debug!(
            "Replaying {} saved detections for {}x{} image",
            self.detections.len(),
            buffer.width(),
            buffer.height()
        );
        Ok(self.detections.clone())
    }
}
