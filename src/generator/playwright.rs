use crate::spec::spec_model::{Assertion, Step, StepAction, TargetDescriptor};

// ============================================================================
// Playwright statement generation
// ============================================================================

/// One indentation level in generated TypeScript.
pub const INDENT: &str = "  ";

/// Indentation of step lines: describe > test > test.step body.
pub const STEP_INDENT: &str = "      ";

/// Generate the source lines for one step, already indented to step depth.
///
/// Produces a `// description` comment followed by the step's statement:
/// ```text
///       // submit the form
///       await page.getByRole('button', { name: 'Submit' }).click();
/// ```
/// Only the fields of the step's own variant are read.
pub fn generate_step(step: &Step) -> Vec<String> {
    let mut lines = vec![format!("{}// {}", STEP_INDENT, single_line(&step.description))];

    match &step.action {
        StepAction::Click { target } => {
            lines.push(statement(format!("await {}.click();", locator(target))));
        }
        StepAction::Fill { target, value } => {
            lines.push(statement(format!(
                "await {}.fill({});",
                locator(target),
                quote(value)
            )));
        }
        StepAction::Verify { assertion } => {
            lines.push(statement(assertion_statement(assertion)));
        }
        StepAction::Navigate { path } => {
            lines.push(statement(format!("await page.goto({});", quote(path))));
        }
        StepAction::Screenshot { name } => {
            lines.push(statement(format!(
                "await page.screenshot({{ path: {} }});",
                quote(&screenshot_path(name))
            )));
        }
        StepAction::Custom { statement: raw } => {
            lines.extend(verbatim_lines(raw, STEP_INDENT));
        }
    }

    lines
}

/// Generate the concatenated lines for an ordered list of steps.
pub fn generate_steps(steps: &[Step]) -> Vec<String> {
    steps.iter().flat_map(generate_step).collect()
}

fn statement(code: String) -> String {
    format!("{}{}", STEP_INDENT, code)
}

fn assertion_statement(assertion: &Assertion) -> String {
    match assertion {
        Assertion::Visible { target } => {
            format!("await expect({}).toBeVisible();", locator(target))
        }
        Assertion::HasText { target, expected } => format!(
            "await expect({}).toContainText({});",
            locator(target),
            quote(expected)
        ),
        Assertion::Enabled { target } => {
            format!("await expect({}).toBeEnabled();", locator(target))
        }
        Assertion::Disabled { target } => {
            format!("await expect({}).toBeDisabled();", locator(target))
        }
        Assertion::HasUrl { expected } => {
            format!("await expect(page).toHaveURL({});", url_pattern(expected))
        }
    }
}

// ============================================================================
// Expression helpers
// ============================================================================

/// Build a `getByRole` locator. An empty accessible name means no name filter.
pub fn locator(target: &TargetDescriptor) -> String {
    if target.name.is_empty() {
        format!("page.getByRole({})", quote(&target.role))
    } else {
        format!(
            "page.getByRole({}, {{ name: {} }})",
            quote(&target.role),
            quote(&target.name)
        )
    }
}

/// Wrap a URL fragment into a regex literal matching any URL that contains it.
pub fn url_pattern(fragment: &str) -> String {
    format!("/{}/", regex::escape(fragment).replace('/', "\\/"))
}

/// Quote a value as a single-quoted TypeScript string literal.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn screenshot_path(name: &str) -> String {
    if name.to_lowercase().ends_with(".png") {
        format!("screenshots/{}", name)
    } else {
        format!("screenshots/{}.png", name)
    }
}

/// Place raw source text at `indent`, keeping its relative indentation.
///
/// The indentation shared by all non-blank lines is replaced by `indent`.
/// Leading and trailing blank lines are dropped; blank lines inside the
/// block stay as empty lines.
pub fn verbatim_lines(text: &str, indent: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let first = lines.iter().position(|l| !l.is_empty());
    let last = lines.iter().rposition(|l| !l.is_empty());
    let (first, last) = match (first, last) {
        (Some(first), Some(last)) => (first, last),
        _ => return Vec::new(),
    };
    let block = &lines[first..=last];

    let shared = block
        .iter()
        .filter(|l| !l.is_empty())
        .map(|l| leading_indent(l))
        .min()
        .unwrap_or(0);

    block
        .iter()
        .map(|l| {
            if l.is_empty() {
                String::new()
            } else {
                format!("{}{}", indent, &l[shared..])
            }
        })
        .collect()
}

/// Byte length of the leading spaces and tabs.
fn leading_indent(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

/// Collapse a free-text value onto one line for use inside a `//` comment.
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
