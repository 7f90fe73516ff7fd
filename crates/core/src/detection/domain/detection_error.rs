use std::path::PathBuf;

use thiserror::Error;

use crate::detection::domain::detector_state::DetectorState;

#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("detection {index} has no bounding box")]
    MissingBox { index: usize },
    #[error("failed to read detections from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed detection data: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("face detector is not ready (state: {0})")]
    NotReady(DetectorState),
    #[error("face detector is already {0}")]
    AlreadyStarted(DetectorState),
    #[error("face detector failed to load: {0}")]
    LoadFailed(String),
}
