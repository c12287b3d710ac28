use chrono::{DateTime, SecondsFormat, Utc};

use crate::generator::playwright::{INDENT, generate_steps, quote, single_line, verbatim_lines};
use crate::spec::spec_model::{Suite, TestCase};

// ============================================================================
// Suite assembly
// ============================================================================

/// Assemble the complete spec file for a suite.
///
/// The generation timestamp is injected so identical suites with identical
/// timestamps assemble to byte-identical text.
///
/// ```text
/// import { test, expect } from '@playwright/test';
///
/// /**
///  * Login Page
///  * ...
///  */
///
/// test.describe('Login Page', () => {
///   test.beforeEach(async ({ page }) => {
///     await page.goto('http://localhost:3000/login');
///   });
///
///   test('displays login form', async ({ page }) => {
///     // Objective: verify form renders
///     await test.step('displays login form', async () => {
///       ...
///     });
///   });
/// });
/// ```
pub fn assemble_suite(suite: &Suite, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();

    out.push_str("import { test, expect } from '@playwright/test';\n\n");
    out.push_str(&header_comment(suite, generated_at));
    out.push('\n');

    out.push_str(&format!(
        "test.describe({}, () => {{\n",
        quote(&suite.describe_title)
    ));
    out.push_str(&setup_hook(suite));

    for case in &suite.test_cases {
        out.push('\n');
        out.push_str(&test_block(case));
    }

    out.push_str("});\n");
    out
}

fn header_comment(suite: &Suite, generated_at: DateTime<Utc>) -> String {
    let mut out = String::from("/**\n");
    out.push_str(&format!(" * {}\n", comment_text(&suite.describe_title)));
    out.push_str(" *\n");
    out.push_str(&format!(" * Category: {}\n", suite.category));
    out.push_str(&format!(" * Feature: {}\n", comment_text(&suite.feature_name)));
    out.push_str(&format!(
        " * Generated: {}\n",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    out.push_str(" */\n");
    out
}

fn setup_hook(suite: &Suite) -> String {
    let body = INDENT.repeat(2);
    let mut out = format!("{}test.beforeEach(async ({{ page }}) => {{\n", INDENT);
    out.push_str(&format!(
        "{}await page.goto({});\n",
        body,
        quote(&join_url(&suite.base_url, &suite.initial_path))
    ));

    if let Some(setup) = &suite.additional_setup {
        for line in verbatim_lines(setup, &body) {
            out.push_str(&line);
            out.push('\n');
        }
    }

    out.push_str(&format!("{}}});\n", INDENT));
    out
}

fn test_block(case: &TestCase) -> String {
    let body = INDENT.repeat(2);
    let mut out = format!(
        "{}test({}, async ({{ page }}) => {{\n",
        INDENT,
        quote(&case.title)
    );
    out.push_str(&format!("{}// Objective: {}\n", body, single_line(&case.objective)));
    out.push_str(&format!(
        "{}await test.step({}, async () => {{\n",
        body,
        quote(&case.title)
    ));
    for line in generate_steps(&case.steps) {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(&format!("{}}});\n", body));
    out.push_str(&format!("{}}});\n", INDENT));
    out
}

/// Join a base URL and a path with exactly one `/` between them.
pub fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Keep free text from closing the surrounding block comment.
fn comment_text(text: &str) -> String {
    single_line(text).replace("*/", "* /")
}
