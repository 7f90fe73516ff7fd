pub mod block_size;
pub mod censor_error;
pub mod constants;
pub mod pixel_buffer;
pub mod rectangle;
pub mod region;
