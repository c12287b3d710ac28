use std::path::Path;

use tracing::debug;

use crate::error::GenError;
use crate::spec::encoder::validate_step;
use crate::spec::spec_model::Suite;

// ============================================================================
// Suite YAML files
// ============================================================================

/// Load a suite from a YAML file and check it the same way collected input
/// is checked: required suite fields non-blank, every step valid for its kind.
pub fn load_suite(path: &Path) -> Result<Suite, GenError> {
    let content = std::fs::read_to_string(path).map_err(|source| GenError::SuiteFile {
        path: path.to_path_buf(),
        source,
    })?;
    let suite: Suite = serde_yaml::from_str(&content).map_err(|source| GenError::SuiteParse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_suite(&suite)?;
    debug!(
        path = %path.display(),
        test_cases = suite.test_cases.len(),
        steps = suite.step_count(),
        "loaded suite file"
    );
    Ok(suite)
}

/// Serialize a suite to YAML and write it to `path`.
pub fn save_suite(suite: &Suite, path: &Path) -> Result<(), GenError> {
    let yaml = serde_yaml::to_string(suite).map_err(GenError::SuiteSerialize)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| GenError::SuiteFile {
            path: path.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, yaml).map_err(|source| GenError::SuiteFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Reject suites with blank required values.
pub fn validate_suite(suite: &Suite) -> Result<(), GenError> {
    let required = [
        ("feature_name", &suite.feature_name),
        ("file_base_name", &suite.file_base_name),
        ("base_url", &suite.base_url),
        ("describe_title", &suite.describe_title),
        ("initial_path", &suite.initial_path),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(GenError::InvalidSuite(format!("{} must not be empty", field)));
        }
    }

    for (case_index, case) in suite.test_cases.iter().enumerate() {
        if case.title.trim().is_empty() || case.objective.trim().is_empty() {
            return Err(GenError::InvalidSuite(format!(
                "test case {} needs a title and an objective",
                case_index + 1
            )));
        }
        for (step_index, step) in case.steps.iter().enumerate() {
            if let Err(field) = validate_step(step) {
                return Err(GenError::InvalidSuite(format!(
                    "test case '{}', step {}: missing {}",
                    case.title,
                    step_index + 1,
                    field.prompt().to_lowercase()
                )));
            }
        }
    }
    Ok(())
}
