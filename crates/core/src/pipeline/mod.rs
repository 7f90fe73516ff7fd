pub mod censor_image_use_case;
pub mod censor_logger;
pub mod censor_session;
pub mod detection_filter;
