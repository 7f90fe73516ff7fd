pub mod detector_slot;
pub mod json_file_detector;
