pub mod assembler;
pub mod playwright;
pub mod writer;
