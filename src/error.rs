use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a generator run.
///
/// Missing or unrecognized operator input is never an error: the collector
/// re-prompts or falls back to a default instead.
#[derive(Error, Debug)]
pub enum GenError {
    /// Operator input ended (EOF or exhausted replay) while a prompt was waiting
    #[error("input closed while waiting for '{prompt}'")]
    InputClosed { prompt: String },

    /// Reading from or writing to the terminal failed
    #[error("terminal I/O failed: {0}")]
    Terminal(#[source] std::io::Error),

    /// The generated suite file could not be written
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A transcript file could not be opened or read
    #[error("transcript {path:?}: {source}")]
    Transcript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A transcript line was not a valid JSON event
    #[error("invalid transcript line {line}: {source}")]
    TranscriptParse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A suite file could not be read or written
    #[error("suite file {path:?}: {source}")]
    SuiteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A suite file was not valid YAML for the suite model
    #[error("invalid suite YAML in {path:?}: {source}")]
    SuiteParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize suite: {0}")]
    SuiteSerialize(#[source] serde_yaml::Error),

    /// A loaded suite is missing a required value
    #[error("invalid suite: {0}")]
    InvalidSuite(String),
}
