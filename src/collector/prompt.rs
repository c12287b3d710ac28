use std::collections::VecDeque;
use std::io::{BufRead, Stdin, Stdout, Write};

use tracing::warn;

use crate::error::GenError;
use crate::trace::logger::TranscriptLogger;
use crate::trace::transcript::TranscriptEvent;

// ============================================================================
// Prompter trait: the source of operator answers
// ============================================================================

/// A source of operator answers. The collector only talks to this trait, so
/// a terminal session, a scripted test, and a transcript replay all drive
/// the same prompt loops.
pub trait Prompter {
    /// Show `label` and return the operator's answer with surrounding
    /// whitespace trimmed. Fails with `GenError::InputClosed` when no more
    /// input can arrive.
    fn ask(&mut self, label: &str) -> Result<String, GenError>;

    /// Show informational text (menus, hints) without waiting for input.
    fn show(&mut self, text: &str) -> Result<(), GenError>;
}

// ============================================================================
// Terminal
// ============================================================================

/// Reads answers line by line from `input`, writing prompts to `output`.
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl TerminalPrompter<std::io::BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::BufReader::new(std::io::stdin()), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn ask(&mut self, label: &str) -> Result<String, GenError> {
        write!(self.output, "{}: ", label).map_err(GenError::Terminal)?;
        self.output.flush().map_err(GenError::Terminal)?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(GenError::Terminal)?;
        if read == 0 {
            return Err(GenError::InputClosed {
                prompt: label.to_string(),
            });
        }
        Ok(line.trim().to_string())
    }

    fn show(&mut self, text: &str) -> Result<(), GenError> {
        writeln!(self.output, "{}", text).map_err(GenError::Terminal)
    }
}

// ============================================================================
// Scripted answers
// ============================================================================

/// Answers from a fixed list, in order. Records every prompt label and every
/// shown text so callers can inspect the conversation afterwards.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub asked: Vec<String>,
    pub shown: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
            shown: Vec::new(),
        }
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, label: &str) -> Result<String, GenError> {
        self.asked.push(label.to_string());
        match self.answers.pop_front() {
            Some(answer) => Ok(answer.trim().to_string()),
            None => Err(GenError::InputClosed {
                prompt: label.to_string(),
            }),
        }
    }

    fn show(&mut self, text: &str) -> Result<(), GenError> {
        self.shown.push(text.to_string());
        Ok(())
    }
}

// ============================================================================
// Transcript replay and recording
// ============================================================================

/// Replays answers from a recorded transcript. Prompts are echoed to
/// `output` together with the replayed answer.
pub struct ReplayPrompter<W> {
    events: VecDeque<TranscriptEvent>,
    output: W,
}

impl<W: Write> ReplayPrompter<W> {
    pub fn new(events: Vec<TranscriptEvent>, output: W) -> Self {
        Self {
            events: events.into(),
            output,
        }
    }
}

impl<W: Write> Prompter for ReplayPrompter<W> {
    fn ask(&mut self, label: &str) -> Result<String, GenError> {
        let event = self.events.pop_front().ok_or_else(|| GenError::InputClosed {
            prompt: label.to_string(),
        })?;
        if event.prompt != label {
            warn!(
                seq = event.seq,
                expected = label,
                recorded = %event.prompt,
                "transcript prompt mismatch, using recorded answer"
            );
        }
        writeln!(self.output, "{}: {}", label, event.answer).map_err(GenError::Terminal)?;
        Ok(event.answer.trim().to_string())
    }

    fn show(&mut self, text: &str) -> Result<(), GenError> {
        writeln!(self.output, "{}", text).map_err(GenError::Terminal)
    }
}

/// Wraps another prompter and appends every answered prompt to a transcript.
pub struct RecordingPrompter {
    inner: Box<dyn Prompter>,
    logger: TranscriptLogger,
    seq: u64,
}

impl RecordingPrompter {
    pub fn new(inner: Box<dyn Prompter>, logger: TranscriptLogger) -> Self {
        Self {
            inner,
            logger,
            seq: 0,
        }
    }
}

impl Prompter for RecordingPrompter {
    fn ask(&mut self, label: &str) -> Result<String, GenError> {
        let answer = self.inner.ask(label)?;
        self.seq += 1;
        self.logger.log(&TranscriptEvent::now(self.seq, label, &answer));
        Ok(answer)
    }

    fn show(&mut self, text: &str) -> Result<(), GenError> {
        self.inner.show(text)
    }
}
