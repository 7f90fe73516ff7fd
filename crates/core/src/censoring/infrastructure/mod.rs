pub mod block_pixelator;
pub mod censor_factory;
