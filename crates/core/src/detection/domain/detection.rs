use serde::{Deserialize, Serialize};

use crate::detection::domain::detection_error::DetectionError;
use crate::shared::rectangle::Rectangle;

/// A face reported by a detector, in canonical form.
///
/// `confidence` is carried for reporting and optional thresholding only;
/// censoring never reads it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub rectangle: Rectangle,
    pub confidence: Option<f64>,
}

impl Detection {
    pub fn new(rectangle: Rectangle, confidence: Option<f64>) -> Self {
        Self {
            rectangle,
            confidence,
        }
    }
}

/// A detector result as it arrives over the boundary.
///
/// Detectors disagree on shape: some nest the box and score under a
/// `detection` object (landmark/descriptor results), others report them
/// flat. The nested values win when both are present.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DetectionRecord {
    detection: Option<NestedDetection>,
    #[serde(rename = "box", alias = "_box")]
    bbox: Option<Rectangle>,
    #[serde(alias = "_score")]
    score: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct NestedDetection {
    #[serde(rename = "box", alias = "_box")]
    bbox: Option<Rectangle>,
    #[serde(alias = "_score")]
    score: Option<f64>,
}

impl DetectionRecord {
    pub fn flat(rectangle: Rectangle, score: Option<f64>) -> Self {
        Self {
            detection: None,
            bbox: Some(rectangle),
            score,
        }
    }

    pub fn nested(rectangle: Rectangle, score: Option<f64>) -> Self {
        Self {
            detection: Some(NestedDetection {
                bbox: Some(rectangle),
                score,
            }),
            bbox: None,
            score: None,
        }
    }

    /// Converts to a [`Detection`]. `index` is 1-based and only used for
    /// error reporting. A record without a box is an error, never a zero
    /// rectangle.
    pub fn into_detection(self, index: usize) -> Result<Detection, DetectionError> {
        let (nested_box, nested_score) = self
            .detection
            .map(|d| (d.bbox, d.score))
            .unwrap_or_default();
        let rectangle = nested_box
            .or(self.bbox)
            .ok_or(DetectionError::MissingBox { index })?;
        Ok(Detection::new(rectangle, nested_score.or(self.score)))
    }
}

/// Normalizes every record, dropping (with a warning) any that lack a box.
pub fn normalize_records(records: Vec<DetectionRecord>) -> Vec<Detection> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| match record.into_detection(i + 1) {
            Ok(detection) => {
                log_detection(i + 1, &detection);
                Some(detection)
            }
            Err(e) => {
                log::warn!("Skipping face {}: {e}", i + 1);
                None
            }
        })
        .collect()
}

fn log_detection(index: usize, detection: &Detection) {
    let r = &detection.rectangle;
    let confidence = detection
        .confidence
        .map_or_else(|| "N/A".to_string(), |c| format!("{c:.3}"));
    log::info!(
        "  Face {index}: x={:.0} y={:.0} width={:.0} height={:.0} confidence={confidence}",
        r.x,
        r.y,
        r.width,
        r.height
    );
}
