//! Interactive generator for Playwright test suites.
//!
//! The operator describes a suite through terminal prompts (or a recorded
//! transcript, or a YAML suite file); each described action is encoded into
//! a typed `Step`, compiled into Playwright statements, and the whole suite
//! is assembled into one `*.spec.ts` file.

pub mod cli;
pub mod collector;
pub mod error;
pub mod generator;
pub mod report;
pub mod spec;
pub mod trace;

pub use error::GenError;
