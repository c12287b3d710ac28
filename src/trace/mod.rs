pub mod logger;
pub mod transcript;
