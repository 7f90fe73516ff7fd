pub const RGBA_CHANNELS: usize = 4;

pub const DEFAULT_BLOCK_SIZE: u32 = 10;

/// Block sizes offered by interactive front ends ("Low" to "High" intensity).
pub const MIN_INTERACTIVE_BLOCK_SIZE: u32 = 5;
pub const MAX_INTERACTIVE_BLOCK_SIZE: u32 = 30;

pub const DEFAULT_OUTPUT_NAME: &str = "censored-image.png";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp", "gif"];
