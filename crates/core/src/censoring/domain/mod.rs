pub mod region_censor;
pub mod region_clipper;
