pub mod collector;
pub mod menu;
pub mod prompt;
