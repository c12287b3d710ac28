use chrono::{TimeZone, Utc};
use playwright_testgen::GenError;
use playwright_testgen::cli::commands::{build_prompter, run_session};
use playwright_testgen::cli::config::Settings;
use playwright_testgen::collector::collector::{Collector, CollectorOptions};
use playwright_testgen::collector::prompt::{Prompter, RecordingPrompter, ReplayPrompter, ScriptedPrompter};
use playwright_testgen::generator::writer::OutputTarget;
use playwright_testgen::trace::logger::TranscriptLogger;
use playwright_testgen::trace::transcript::{TranscriptEvent, load_transcript};

// ============================================================================
// Helpers
// ============================================================================

fn login_answers() -> Vec<&'static str> {
    vec![
        "login",
        "login",
        "http://localhost:3000",
        "1",
        "Login Page",
        "/login",
        "",
        "displays login form",
        "verify form renders",
        "check heading",
        "3",
        "1",
        "heading",
        "Login",
        "next",
        "done",
    ]
}

fn record(path: &std::path::Path) {
    let scripted = ScriptedPrompter::new(login_answers());
    let mut recorder = RecordingPrompter::new(Box::new(scripted), TranscriptLogger::new(path));
    Collector::new(&mut recorder, CollectorOptions::default())
        .collect_suite()
        .unwrap();
}

// ============================================================================
// Recording
// ============================================================================

#[test]
fn recording_writes_one_line_per_answer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.jsonl");
    record(&path);

    let events = load_transcript(&path).unwrap();
    assert_eq!(events.len(), login_answers().len());
    assert_eq!(events[0].seq, 1);
    assert_eq!(events[0].prompt, "Feature name");
    assert_eq!(events[0].answer, "login");
    assert_eq!(events.last().unwrap().answer, "done");
    assert!(events.windows(2).all(|w| w[1].seq == w[0].seq + 1));
    assert!(events.iter().all(|e| e.timestamp_ms > 0));
}

#[test]
fn unopenable_transcript_disables_logging() {
    let dir = tempfile::tempdir().unwrap();
    let logger = TranscriptLogger::new(&dir.path().join("missing").join("t.jsonl"));
    assert!(!logger.is_enabled());
    logger.log(&TranscriptEvent::new(1, "Feature name", "login"));
}

// ============================================================================
// Replay
// ============================================================================

#[test]
fn replay_reproduces_recorded_suite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.jsonl");
    record(&path);

    let mut direct = ScriptedPrompter::new(login_answers());
    let expected = Collector::new(&mut direct, CollectorOptions::default())
        .collect_suite()
        .unwrap();

    let mut echoed = Vec::new();
    let mut replay = ReplayPrompter::new(load_transcript(&path).unwrap(), &mut echoed);
    let replayed = Collector::new(&mut replay, CollectorOptions::default())
        .collect_suite()
        .unwrap();
    drop(replay);

    assert_eq!(replayed, expected);
    let echoed = String::from_utf8(echoed).unwrap();
    assert!(echoed.contains("Feature name: login"));
}

#[test]
fn replayed_sessions_write_identical_files() {
    let dir = tempfile::tempdir().unwrap();
    let transcript = dir.path().join("session.jsonl");
    record(&transcript);

    let settings = Settings {
        output: OutputTarget {
            directory: dir.path().join("out"),
            extension: "spec.ts".into(),
        },
        collector: CollectorOptions::default(),
    };
    let at = Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap();

    let mut first = ReplayPrompter::new(load_transcript(&transcript).unwrap(), Vec::new());
    let (_, path) = run_session(&mut first, &settings, at).unwrap();
    let before = std::fs::read(&path).unwrap();

    let mut second = ReplayPrompter::new(load_transcript(&transcript).unwrap(), Vec::new());
    let (suite, again) = run_session(&mut second, &settings, at).unwrap();

    assert_eq!(path, again);
    assert_eq!(before, std::fs::read(&again).unwrap());
    assert_eq!(suite.test_cases.len(), 1);
}

#[test]
fn truncated_transcript_ends_in_input_closed() {
    let events = vec![
        TranscriptEvent::new(1, "Feature name", "login"),
        TranscriptEvent::new(2, "Test file name (without extension)", "login"),
    ];
    let mut replay = ReplayPrompter::new(events, Vec::new());
    replay.ask("Feature name").unwrap();
    replay.ask("Test file name (without extension)").unwrap();
    assert!(matches!(
        replay.ask("Base URL (e.g. http://localhost:3000)"),
        Err(GenError::InputClosed { .. })
    ));
}

// ============================================================================
// Transcript parsing
// ============================================================================

#[test]
fn blank_lines_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.jsonl");
    std::fs::write(
        &path,
        "{\"seq\":1,\"prompt\":\"Feature name\",\"answer\":\"login\"}\n\n   \n\
         {\"seq\":2,\"prompt\":\"Objective\",\"answer\":\"works\",\"timestamp_ms\":5}\n",
    )
    .unwrap();

    let events = load_transcript(&path).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].timestamp_ms, 0);
    assert_eq!(events[1].answer, "works");
}

#[test]
fn malformed_line_reports_its_number() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.jsonl");
    std::fs::write(
        &path,
        "{\"seq\":1,\"prompt\":\"Feature name\",\"answer\":\"login\"}\nnot json\n",
    )
    .unwrap();

    match load_transcript(&path) {
        Err(GenError::TranscriptParse { line, .. }) => assert_eq!(line, 2),
        other => panic!("Expected TranscriptParse, got {:?}", other),
    }
}

#[test]
fn missing_transcript_is_an_error() {
    let err = load_transcript(std::path::Path::new("no/such/file.jsonl")).unwrap_err();
    assert!(matches!(err, GenError::Transcript { .. }));
}

// ============================================================================
// Prompter wiring
// ============================================================================

fn write_transcript(path: &std::path::Path, answers: &[(&str, &str)]) {
    let lines: Vec<String> = answers
        .iter()
        .enumerate()
        .map(|(i, (prompt, answer))| {
            serde_json::to_string(&TranscriptEvent::new(i as u64 + 1, prompt, answer)).unwrap()
        })
        .collect();
    std::fs::write(path, lines.join("\n")).unwrap();
}

#[test]
fn build_prompter_records_replayed_answers() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("source.jsonl");
    let copy = dir.path().join("copy.jsonl");
    write_transcript(&source, &[("Feature name", "login")]);

    let mut prompter =
        build_prompter(source.to_str(), copy.to_str()).expect("prompter should build");
    assert_eq!(prompter.ask("Feature name").unwrap(), "login");
    drop(prompter);

    let recorded = load_transcript(&copy).unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].answer, "login");
}

#[test]
fn build_prompter_continues_when_record_path_is_unwritable() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("source.jsonl");
    let unwritable = dir.path().join("missing").join("copy.jsonl");
    write_transcript(&source, &[("Feature name", "login")]);

    let mut prompter =
        build_prompter(source.to_str(), unwritable.to_str()).expect("prompter should build");
    assert_eq!(prompter.ask("Feature name").unwrap(), "login");
    assert!(!unwritable.exists());
}
