use crate::spec::spec_model::{
    ActionKind, Assertion, AssertionKind, Step, StepAction, TargetDescriptor,
};

// ============================================================================
// Step drafts: collected fields before validation
// ============================================================================

/// A step candidate as collected from the operator. Every field except the
/// description and kind may still be missing; `encode_step` decides which
/// ones the kind actually needs.
#[derive(Debug, Clone, PartialEq)]
pub struct StepDraft {
    pub description: String,
    pub kind: ActionKind,
    pub role: Option<String>,
    pub name: Option<String>,
    pub fill_value: Option<String>,
    pub assertion: Option<AssertionKind>,
    pub expected: Option<String>,
    pub navigate_target: Option<String>,
    pub screenshot_name: Option<String>,
    pub custom_statement: Option<String>,
}

impl StepDraft {
    pub fn new(description: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            description: description.into(),
            kind,
            role: None,
            name: None,
            fill_value: None,
            assertion: None,
            expected: None,
            navigate_target: None,
            screenshot_name: None,
            custom_statement: None,
        }
    }
}

/// A field the encoder found missing. The collector re-prompts for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepField {
    Description,
    TargetRole,
    FillValue,
    Assertion,
    AssertionExpected,
    NavigateTarget,
    ScreenshotName,
    CustomStatement,
}

impl StepField {
    /// Prompt label shown to the operator for this field.
    pub fn prompt(&self) -> &'static str {
        match self {
            StepField::Description => "Step description",
            StepField::TargetRole => "Element role (e.g. button, textbox, heading)",
            StepField::FillValue => "Value to fill",
            StepField::Assertion => "Assertion",
            StepField::AssertionExpected => "Expected value",
            StepField::NavigateTarget => "Path to navigate to (e.g. /dashboard)",
            StepField::ScreenshotName => "Screenshot name",
            StepField::CustomStatement => "Custom statement",
        }
    }
}

// ============================================================================
// Target descriptors
// ============================================================================

impl TargetDescriptor {
    /// Parse the combined `"role name"` form: role is everything before the
    /// first whitespace, name is the rest. A string with no whitespace yields
    /// an empty name (match by role only).
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.split_once(char::is_whitespace) {
            Some((role, name)) => TargetDescriptor::new(role, name.trim()),
            None => TargetDescriptor::new(raw, ""),
        }
    }
}

/// Normalize the draft's role/name answers into a target.
///
/// When no separate name was collected the role answer is parsed as the
/// combined `"role name"` form.
fn draft_target(draft: &StepDraft) -> Option<TargetDescriptor> {
    let role = present(&draft.role)?;
    match &draft.name {
        Some(name) => Some(TargetDescriptor::new(role, name.trim())),
        None => Some(TargetDescriptor::parse(role)),
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn require(field: &Option<String>, missing: StepField) -> Result<String, StepField> {
    present(field).map(str::to_string).ok_or(missing)
}

// ============================================================================
// Encoding and validation
// ============================================================================

/// Validate a draft and encode it into a `Step`.
///
/// Returns the first missing field in prompt order. Only fields required by
/// the draft's kind (and, for Verify, its assertion kind) are read; anything
/// else left in the draft is ignored.
pub fn encode_step(draft: &StepDraft) -> Result<Step, StepField> {
    let description = draft.description.trim();
    if description.is_empty() {
        return Err(StepField::Description);
    }

    let action = match draft.kind {
        ActionKind::Click => StepAction::Click {
            target: draft_target(draft).ok_or(StepField::TargetRole)?,
        },
        ActionKind::Fill => {
            let target = draft_target(draft).ok_or(StepField::TargetRole)?;
            let value = require(&draft.fill_value, StepField::FillValue)?;
            StepAction::Fill { target, value }
        }
        ActionKind::Verify => StepAction::Verify {
            assertion: encode_assertion(draft)?,
        },
        ActionKind::Navigate => StepAction::Navigate {
            path: require(&draft.navigate_target, StepField::NavigateTarget)?,
        },
        ActionKind::Screenshot => StepAction::Screenshot {
            name: require(&draft.screenshot_name, StepField::ScreenshotName)?,
        },
        ActionKind::Custom => StepAction::Custom {
            statement: require(&draft.custom_statement, StepField::CustomStatement)?,
        },
    };

    Ok(Step {
        description: description.to_string(),
        action,
    })
}

fn encode_assertion(draft: &StepDraft) -> Result<Assertion, StepField> {
    let kind = draft.assertion.ok_or(StepField::Assertion)?;

    let target = if kind.needs_target() {
        Some(draft_target(draft).ok_or(StepField::TargetRole)?)
    } else {
        None
    };
    let expected = if kind.needs_expected() {
        Some(require(&draft.expected, StepField::AssertionExpected)?)
    } else {
        None
    };

    let assertion = match (kind, target, expected) {
        (AssertionKind::Visible, Some(target), _) => Assertion::Visible { target },
        (AssertionKind::HasText, Some(target), Some(expected)) => {
            Assertion::HasText { target, expected }
        }
        (AssertionKind::Enabled, Some(target), _) => Assertion::Enabled { target },
        (AssertionKind::Disabled, Some(target), _) => Assertion::Disabled { target },
        (AssertionKind::HasUrl, _, Some(expected)) => Assertion::HasUrl { expected },
        // needs_target / needs_expected guarantee the fields above
        (_, None, _) => return Err(StepField::TargetRole),
        (_, _, None) => return Err(StepField::AssertionExpected),
    };
    Ok(assertion)
}

/// Check an already-typed step (e.g. loaded from YAML) for blank required
/// values. Accessible names may be blank.
pub fn validate_step(step: &Step) -> Result<(), StepField> {
    if blank(&step.description) {
        return Err(StepField::Description);
    }

    match &step.action {
        StepAction::Click { target } => check_target(target),
        StepAction::Fill { target, value } => {
            check_target(target)?;
            if blank(value) {
                return Err(StepField::FillValue);
            }
            Ok(())
        }
        StepAction::Verify { assertion } => {
            if let Some(target) = assertion.target() {
                check_target(target)?;
            }
            match assertion {
                Assertion::HasText { expected, .. } | Assertion::HasUrl { expected }
                    if blank(expected) =>
                {
                    Err(StepField::AssertionExpected)
                }
                _ => Ok(()),
            }
        }
        StepAction::Navigate { path } if blank(path) => Err(StepField::NavigateTarget),
        StepAction::Screenshot { name } if blank(name) => Err(StepField::ScreenshotName),
        StepAction::Custom { statement } if blank(statement) => Err(StepField::CustomStatement),
        StepAction::Navigate { .. } | StepAction::Screenshot { .. } | StepAction::Custom { .. } => {
            Ok(())
        }
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_target(target: &TargetDescriptor) -> Result<(), StepField> {
    if blank(&target.role) {
        Err(StepField::TargetRole)
    } else {
        Ok(())
    }
}
