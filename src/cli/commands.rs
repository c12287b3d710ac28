use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::cli::config::{Cli, Settings};
use crate::collector::collector::{Collector, CollectorOptions, TEST_CASE_SENTINEL};
use crate::collector::prompt::{Prompter, RecordingPrompter, ReplayPrompter, TerminalPrompter};
use crate::error::GenError;
use crate::generator::writer::write_suite;
use crate::report::console::format_generation_summary;
use crate::spec::spec_model::Suite;
use crate::spec::suite_file::{load_suite, save_suite};
use crate::trace::logger::TranscriptLogger;
use crate::trace::transcript::load_transcript;

// ============================================================================
// generate (the only command)
// ============================================================================

/// Obtain a suite (from a suite file or the prompts), write the spec file,
/// and print the summary. Returns the path written.
pub fn cmd_generate(cli: &Cli, settings: &Settings) -> Result<PathBuf, GenError> {
    let suite = match cli.suite.as_deref() {
        Some(path) => load_suite(Path::new(path))?,
        None => {
            let mut prompter = build_prompter(cli.replay.as_deref(), cli.record.as_deref())?;
            collect_suite(prompter.as_mut(), settings.collector)?
        }
    };

    if let Some(path) = cli.save_suite.as_deref() {
        save_suite(&suite, Path::new(path))?;
        info!(path, "saved suite file");
    }

    let path = write_suite(&suite, &settings.output, Utc::now())?;
    print!("{}", format_generation_summary(&suite, &path));
    Ok(path)
}

/// Run the full prompt session against `prompter`.
pub fn collect_suite(
    prompter: &mut dyn Prompter,
    options: CollectorOptions,
) -> Result<Suite, GenError> {
    prompter.show(&format!(
        "Playwright test suite generator. Enter '{}' (or nothing) at a test case title to finish.\n",
        TEST_CASE_SENTINEL
    ))?;
    Collector::new(prompter, options).collect_suite()
}

/// Collect through `prompter` and write the result with an explicit
/// timestamp. Identical answers and timestamp give an identical file.
pub fn run_session(
    prompter: &mut dyn Prompter,
    settings: &Settings,
    generated_at: DateTime<Utc>,
) -> Result<(Suite, PathBuf), GenError> {
    let suite = collect_suite(prompter, settings.collector)?;
    let path = write_suite(&suite, &settings.output, generated_at)?;
    Ok((suite, path))
}

// ============================================================================
// Helpers
// ============================================================================

/// Build the prompter for this run: stdin or a replayed transcript,
/// optionally wrapped to record a new transcript.
pub fn build_prompter(
    replay: Option<&str>,
    record: Option<&str>,
) -> Result<Box<dyn Prompter>, GenError> {
    let base: Box<dyn Prompter> = match replay {
        Some(path) => {
            let events = load_transcript(Path::new(path))?;
            info!(path, answers = events.len(), "replaying transcript");
            Box::new(ReplayPrompter::new(events, std::io::stdout()))
        }
        None => Box::new(TerminalPrompter::stdio()),
    };

    let Some(path) = record else {
        return Ok(base);
    };
    let logger = TranscriptLogger::new(Path::new(path));
    if !logger.is_enabled() {
        // already warned; the session continues unrecorded
        return Ok(base);
    }
    info!(path, "recording transcript");
    Ok(Box::new(RecordingPrompter::new(base, logger)))
}
