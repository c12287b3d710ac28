use std::path::Path;

use crate::spec::spec_model::Suite;

// ============================================================================
// Console summary printed after the suite file is written
// ============================================================================

/// Format the end-of-run summary with suggested next commands.
///
/// Produces output like:
/// ```text
/// === Generated: tests/e2e/login.spec.ts ===
///
/// Login Page (Functional): 2 test cases, 5 steps
///
/// Next steps:
///   Run tests:    npx playwright test tests/e2e/login.spec.ts
///   Debug:        npx playwright test tests/e2e/login.spec.ts --debug
///   View report:  npx playwright show-report
/// ```
pub fn format_generation_summary(suite: &Suite, path: &Path) -> String {
    let path = path.display();
    let mut out = String::new();

    out.push_str(&format!("\n=== Generated: {} ===\n\n", path));
    out.push_str(&format!(
        "{} ({}): {} test {}, {} {}\n",
        suite.describe_title,
        suite.category,
        suite.test_cases.len(),
        plural(suite.test_cases.len(), "case", "cases"),
        suite.step_count(),
        plural(suite.step_count(), "step", "steps"),
    ));

    if suite.test_cases.is_empty() {
        out.push_str("  (no test cases collected, the describe block is empty)\n");
    }

    out.push_str("\nNext steps:\n");
    out.push_str(&format!("  Run tests:    npx playwright test {}\n", path));
    out.push_str(&format!("  Debug:        npx playwright test {} --debug\n", path));
    out.push_str("  View report:  npx playwright show-report\n");

    out
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
