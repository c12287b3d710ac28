use std::io::BufRead;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::GenError;

/// One answered prompt, stored as a JSON line in a transcript file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptEvent {
    pub seq: u64,
    pub prompt: String,
    pub answer: String,

    #[serde(default)]
    pub timestamp_ms: u128,
}

impl TranscriptEvent {
    pub fn new(seq: u64, prompt: &str, answer: &str) -> Self {
        Self {
            seq,
            prompt: prompt.to_string(),
            answer: answer.to_string(),
            timestamp_ms: 0,
        }
    }

    /// Event stamped with the current wall-clock time.
    pub fn now(seq: u64, prompt: &str, answer: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            ..Self::new(seq, prompt, answer)
        }
    }
}

/// Read a JSONL transcript. Blank lines are skipped.
pub fn load_transcript(path: &Path) -> Result<Vec<TranscriptEvent>, GenError> {
    let file = std::fs::File::open(path).map_err(|source| GenError::Transcript {
        path: path.to_path_buf(),
        source,
    })?;

    let mut events = Vec::new();
    for (index, line) in std::io::BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| GenError::Transcript {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let event: TranscriptEvent =
            serde_json::from_str(&line).map_err(|source| GenError::TranscriptParse {
                line: index + 1,
                source,
            })?;
        events.push(event);
    }
    Ok(events)
}
