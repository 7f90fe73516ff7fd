pub mod detection;
pub mod detection_error;
pub mod detector_state;
pub mod face_detector;
