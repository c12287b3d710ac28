use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::GenError;
use crate::generator::assembler::assemble_suite;
use crate::spec::spec_model::Suite;

/// Default directory generated suites are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "tests/e2e";

/// Default suite file extension (without the leading dot).
pub const DEFAULT_EXTENSION: &str = "spec.ts";

/// Where a generated suite file goes.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTarget {
    pub directory: PathBuf,
    pub extension: String,
}

impl Default for OutputTarget {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_OUTPUT_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl OutputTarget {
    /// `directory / <sanitized base name>.<extension>`
    pub fn path_for(&self, file_base_name: &str) -> PathBuf {
        let extension = self.extension.trim_start_matches('.');
        self.directory
            .join(format!("{}.{}", sanitize_filename(file_base_name), extension))
    }
}

/// Assemble the suite in memory, then create the output directory and write
/// the file in a single call. Returns the path written.
pub fn write_suite(
    suite: &Suite,
    target: &OutputTarget,
    generated_at: DateTime<Utc>,
) -> Result<PathBuf, GenError> {
    let content = assemble_suite(suite, generated_at);
    let path = target.path_for(&suite.file_base_name);

    create_parent(&path)?;
    std::fs::write(&path, content).map_err(|source| GenError::Write {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), test_cases = suite.test_cases.len(), "wrote suite file");
    Ok(path)
}

fn create_parent(path: &Path) -> Result<(), GenError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir).map_err(|source| GenError::Write {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// Sanitize a base name into a safe file name. Alphanumerics, `-`, `_` and
/// `.` are kept; everything else (including path separators) becomes `_`.
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();

    // A bare "." or ".." would still point outside the file name
    if sanitized.chars().all(|c| c == '.') {
        sanitized.replace('.', "_")
    } else {
        sanitized
    }
}
