pub mod encoder;
pub mod spec_model;
pub mod suite_file;
