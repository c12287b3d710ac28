use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Suite and test cases
// ============================================================================

/// A complete test suite description. Collected interactively (or loaded
/// from YAML) and compiled into one Playwright spec file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suite {
    /// Human label for the feature under test
    pub feature_name: String,

    /// Base of the generated file name (extension is appended)
    pub file_base_name: String,

    /// Root address the suite navigates to
    pub base_url: String,

    /// Documentation-only tag shown in the header comment
    #[serde(default)]
    pub category: Category,

    /// Title of the `test.describe` block
    pub describe_title: String,

    /// Path appended to `base_url` in the `beforeEach` hook
    pub initial_path: String,

    /// Raw statement(s) inserted verbatim after the setup navigation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_setup: Option<String>,

    /// Test cases in collection order
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

impl Suite {
    /// Total number of steps across all test cases.
    pub fn step_count(&self) -> usize {
        self.test_cases.iter().map(|tc| tc.steps.len()).sum()
    }
}

/// One named test scenario.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestCase {
    pub title: String,

    /// Embedded as a leading comment in the generated test
    pub objective: String,

    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Documentation category of a suite.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Functional,
    UiVisual,
    FormValidation,
    Navigation,
    ApiIntegration,
    Accessibility,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Functional,
        Category::UiVisual,
        Category::FormValidation,
        Category::Navigation,
        Category::ApiIntegration,
        Category::Accessibility,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Functional => "Functional",
            Category::UiVisual => "UI/Visual",
            Category::FormValidation => "Form Validation",
            Category::Navigation => "Navigation",
            Category::ApiIntegration => "API Integration",
            Category::Accessibility => "Accessibility",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Steps
// ============================================================================

/// One user-described test action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    #[serde(deserialize_with = "scalar_string::deserialize")]
    pub description: String,

    #[serde(flatten)]
    pub action: StepAction,
}

/// The kind-specific payload of a step. Each variant carries exactly the
/// fields its kind requires.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StepAction {
    /// Click an element located by role and accessible name
    Click { target: TargetDescriptor },

    /// Fill an element with a value
    Fill {
        target: TargetDescriptor,
        #[serde(deserialize_with = "scalar_string::deserialize")]
        value: String,
    },

    /// Assert something about an element or the page
    Verify { assertion: Assertion },

    /// Navigate to a path relative to the configured base URL
    Navigate {
        #[serde(deserialize_with = "scalar_string::deserialize")]
        path: String,
    },

    /// Capture a named screenshot
    Screenshot {
        #[serde(deserialize_with = "scalar_string::deserialize")]
        name: String,
    },

    /// Raw statement emitted verbatim
    Custom {
        #[serde(deserialize_with = "scalar_string::deserialize")]
        statement: String,
    },
}

impl StepAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            StepAction::Click { .. } => ActionKind::Click,
            StepAction::Fill { .. } => ActionKind::Fill,
            StepAction::Verify { .. } => ActionKind::Verify,
            StepAction::Navigate { .. } => ActionKind::Navigate,
            StepAction::Screenshot { .. } => ActionKind::Screenshot,
            StepAction::Custom { .. } => ActionKind::Custom,
        }
    }
}

/// Assertion carried by a `Verify` step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    Visible { target: TargetDescriptor },

    /// Element text contains `expected`
    HasText {
        target: TargetDescriptor,
        #[serde(deserialize_with = "scalar_string::deserialize")]
        expected: String,
    },

    Enabled { target: TargetDescriptor },

    Disabled { target: TargetDescriptor },

    /// Page URL contains the `expected` fragment
    HasUrl {
        #[serde(deserialize_with = "scalar_string::deserialize")]
        expected: String,
    },
}

impl Assertion {
    pub fn kind(&self) -> AssertionKind {
        match self {
            Assertion::Visible { .. } => AssertionKind::Visible,
            Assertion::HasText { .. } => AssertionKind::HasText,
            Assertion::Enabled { .. } => AssertionKind::Enabled,
            Assertion::Disabled { .. } => AssertionKind::Disabled,
            Assertion::HasUrl { .. } => AssertionKind::HasUrl,
        }
    }

    /// The element this assertion is scoped to; `None` for page-level assertions.
    pub fn target(&self) -> Option<&TargetDescriptor> {
        match self {
            Assertion::Visible { target }
            | Assertion::HasText { target, .. }
            | Assertion::Enabled { target }
            | Assertion::Disabled { target } => Some(target),
            Assertion::HasUrl { .. } => None,
        }
    }
}

/// Locates a UI element by ARIA role and accessible name.
///
/// An empty `name` means "match by role only".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetDescriptor {
    #[serde(deserialize_with = "scalar_string::deserialize")]
    pub role: String,

    #[serde(default, deserialize_with = "scalar_string::deserialize")]
    pub name: String,
}

/// Serde helper for step text fields.
///
/// Step payloads sit inside internally tagged enums, which buffer values
/// before dispatch; an unquoted YAML scalar such as `1234` or `true` arrives
/// as a number or bool there. Accept any scalar and keep its text.
mod scalar_string {
    use std::fmt;

    use serde::Deserializer;
    use serde::de::{self, Visitor};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ScalarVisitor)
    }

    struct ScalarVisitor;

    impl<'de> Visitor<'de> for ScalarVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number or boolean")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }
}

impl TargetDescriptor {
    pub fn new(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            name: name.into(),
        }
    }
}

// ============================================================================
// Menu kinds
// ============================================================================

/// Step kind tag, used by the action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Click,
    Fill,
    Verify,
    Navigate,
    Screenshot,
    Custom,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::Click,
        ActionKind::Fill,
        ActionKind::Verify,
        ActionKind::Navigate,
        ActionKind::Screenshot,
        ActionKind::Custom,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Click => "Click",
            ActionKind::Fill => "Fill",
            ActionKind::Verify => "Verify",
            ActionKind::Navigate => "Navigate",
            ActionKind::Screenshot => "Screenshot",
            ActionKind::Custom => "Custom",
        }
    }
}

/// Assertion kind tag, used by the assertion menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssertionKind {
    Visible,
    HasText,
    Enabled,
    Disabled,
    HasUrl,
}

impl AssertionKind {
    pub const ALL: [AssertionKind; 5] = [
        AssertionKind::Visible,
        AssertionKind::HasText,
        AssertionKind::Enabled,
        AssertionKind::Disabled,
        AssertionKind::HasUrl,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AssertionKind::Visible => "Visible",
            AssertionKind::HasText => "Has text",
            AssertionKind::Enabled => "Enabled",
            AssertionKind::Disabled => "Disabled",
            AssertionKind::HasUrl => "Has URL",
        }
    }

    pub fn needs_target(&self) -> bool {
        !matches!(self, AssertionKind::HasUrl)
    }

    pub fn needs_expected(&self) -> bool {
        matches!(self, AssertionKind::HasText | AssertionKind::HasUrl)
    }
}
