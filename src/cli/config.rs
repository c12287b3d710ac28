use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::collector::collector::CollectorOptions;
use crate::generator::writer::{DEFAULT_EXTENSION, DEFAULT_OUTPUT_DIR, OutputTarget};

/// Config file looked up in the current directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "playwright-testgen.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "playwright-testgen",
    version,
    about = "Interactively describe a test suite and generate a Playwright spec file"
)]
pub struct Cli {
    /// Output directory for the generated file (default: tests/e2e)
    pub output_dir: Option<String>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to config file (default: playwright-testgen.yaml in current dir)
    #[arg(long)]
    pub config: Option<String>,

    /// Load the suite from a YAML file instead of prompting
    #[arg(long, conflicts_with_all = ["replay", "record"])]
    pub suite: Option<String>,

    /// Also save the collected suite as YAML
    #[arg(long)]
    pub save_suite: Option<String>,

    /// Record every prompt and answer to a JSONL transcript
    #[arg(long)]
    pub record: Option<String>,

    /// Replay answers from a recorded JSONL transcript instead of stdin
    #[arg(long)]
    pub replay: Option<String>,

    /// Suite file extension (default: spec.ts)
    #[arg(long)]
    pub extension: Option<String>,

    /// Re-prompt on unrecognized menu selections instead of falling back
    #[arg(long)]
    pub strict_menus: bool,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `playwright-testgen.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub prompts: PromptConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: String,

    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            extension: default_extension(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PromptConfig {
    #[serde(default)]
    pub strict_menus: bool,
}

// Serde default helpers
fn default_directory() -> String { DEFAULT_OUTPUT_DIR.to_string() }
fn default_extension() -> String { DEFAULT_EXTENSION.to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if the file is missing or
/// malformed (the latter with a warning).
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_FILE);
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = config_path, error = %e, "ignoring malformed config file");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Settings (merge CLI args with config file)
// ============================================================================

/// Resolved run settings: CLI > config file > defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub output: OutputTarget,
    pub collector: CollectorOptions,
}

pub fn resolve_settings(cli: &Cli, config: &AppConfig) -> Settings {
    let directory = cli
        .output_dir
        .as_deref()
        .unwrap_or(&config.output.directory);
    let extension = cli
        .extension
        .as_deref()
        .unwrap_or(&config.output.extension);

    Settings {
        output: OutputTarget {
            directory: PathBuf::from(directory),
            extension: extension.to_string(),
        },
        collector: CollectorOptions {
            strict_menus: cli.strict_menus || config.prompts.strict_menus,
        },
    }
}

/// Default log filter for a `-v` count, used when `RUST_LOG` is unset.
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
