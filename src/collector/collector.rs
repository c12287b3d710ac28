use tracing::{debug, info};

use crate::collector::menu::{MenuChoice, action_menu, assertion_menu, category_menu};
use crate::collector::prompt::Prompter;
use crate::error::GenError;
use crate::spec::encoder::{StepDraft, StepField, encode_step};
use crate::spec::spec_model::{ActionKind, Category, Step, Suite, TestCase};

/// Typed at the test-case title prompt to stop adding test cases.
pub const TEST_CASE_SENTINEL: &str = "done";

/// Typed at the step description prompt to finish the current test case.
pub const STEP_SENTINEL: &str = "next";

const REQUIRED_HINT: &str = "  A value is required.";
const UNKNOWN_SELECTION_HINT: &str = "  Unknown selection, pick a number from the list.";
const CUSTOM_FALLBACK_HINT: &str = "  Not a menu option, using it as a custom statement.";

/// Collector behavior switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectorOptions {
    /// Re-prompt on unrecognized menu input instead of falling back to a default
    pub strict_menus: bool,
}

/// Drives the prompt sequence and builds a `Suite`.
///
/// The suite under construction is a local value owned by `collect_suite`;
/// each nested loop returns the entity it built.
pub struct Collector<'a> {
    prompter: &'a mut dyn Prompter,
    options: CollectorOptions,
}

impl<'a> Collector<'a> {
    pub fn new(prompter: &'a mut dyn Prompter, options: CollectorOptions) -> Self {
        Self { prompter, options }
    }

    /// Collect suite metadata, then test cases until the sentinel.
    pub fn collect_suite(mut self) -> Result<Suite, GenError> {
        let mut suite = self.collect_header()?;

        while let Some(case) = self.collect_test_case(suite.test_cases.len() + 1)? {
            info!(title = %case.title, steps = case.steps.len(), "test case collected");
            suite.test_cases.push(case);
        }

        Ok(suite)
    }

    fn collect_header(&mut self) -> Result<Suite, GenError> {
        let feature_name = self.required("Feature name")?;
        let file_base_name = self.required("Test file name (without extension)")?;
        let base_url = self.required("Base URL (e.g. http://localhost:3000)")?;
        let category = self.select_category()?;
        let describe_title = self.required("Describe block title")?;
        let initial_path = self.required("Initial path (e.g. /login)")?;
        let additional_setup = self.optional("Additional setup statement (optional)")?;

        Ok(Suite {
            feature_name,
            file_base_name,
            base_url,
            category,
            describe_title,
            initial_path,
            additional_setup,
            test_cases: Vec::new(),
        })
    }

    /// Collect one test case, or `None` when the operator enters the sentinel
    /// (or nothing) at the title prompt.
    pub fn collect_test_case(&mut self, number: usize) -> Result<Option<TestCase>, GenError> {
        self.prompter.show(&format!("\n--- Test case {} ---", number))?;
        let title = self.prompter.ask(&format!(
            "Test case title (or '{}' to finish)",
            TEST_CASE_SENTINEL
        ))?;
        if title.is_empty() || title == TEST_CASE_SENTINEL {
            return Ok(None);
        }

        let objective = self.required("Objective")?;

        let mut steps = Vec::new();
        while let Some(step) = self.collect_step(steps.len() + 1)? {
            steps.push(step);
        }

        Ok(Some(TestCase {
            title,
            objective,
            steps,
        }))
    }

    /// Collect one step, or `None` when the operator enters the sentinel (or
    /// nothing) at the description prompt.
    ///
    /// After the action is chosen, the encoder names the next missing field
    /// and the collector prompts for it until the step encodes.
    pub fn collect_step(&mut self, number: usize) -> Result<Option<Step>, GenError> {
        let description = self.prompter.ask(&format!(
            "Step {} description (or '{}' to finish this test case)",
            number, STEP_SENTINEL
        ))?;
        if description.is_empty() || description == STEP_SENTINEL {
            return Ok(None);
        }

        let mut draft = self.select_action(description)?;
        loop {
            match encode_step(&draft) {
                Ok(step) => {
                    debug!(?step, "step encoded");
                    return Ok(Some(step));
                }
                Err(field) => self.fill_field(&mut draft, field)?,
            }
        }
    }

    // ========================================================================
    // Menus
    // ========================================================================

    fn select_action(&mut self, description: String) -> Result<StepDraft, GenError> {
        let menu = action_menu();
        self.prompter.show(&menu.render())?;

        loop {
            let raw = self.prompter.ask("Select action")?;
            match menu.parse(&raw) {
                MenuChoice::Selected(kind) => return Ok(StepDraft::new(description, kind)),
                MenuChoice::Empty => self.prompter.show(REQUIRED_HINT)?,
                MenuChoice::Unrecognized(_) if self.options.strict_menus => {
                    self.prompter.show(UNKNOWN_SELECTION_HINT)?
                }
                MenuChoice::Unrecognized(raw) => {
                    debug!(input = %raw, "unrecognized action, using it as a custom statement");
                    self.prompter.show(CUSTOM_FALLBACK_HINT)?;
                    let mut draft = StepDraft::new(description, ActionKind::Custom);
                    draft.custom_statement = Some(raw);
                    return Ok(draft);
                }
            }
        }
    }

    /// Ask for the assertion of a Verify draft. Leaves the draft unchanged
    /// when the answer should be asked again; unrecognized input turns the
    /// draft into a custom statement, as for the action menu.
    fn select_assertion(&mut self, draft: &mut StepDraft) -> Result<(), GenError> {
        let menu = assertion_menu();
        self.prompter.show(&menu.render())?;

        let raw = self.prompter.ask("Select assertion")?;
        match menu.parse(&raw) {
            MenuChoice::Selected(kind) => draft.assertion = Some(kind),
            MenuChoice::Empty => self.prompter.show(REQUIRED_HINT)?,
            MenuChoice::Unrecognized(_) if self.options.strict_menus => {
                self.prompter.show(UNKNOWN_SELECTION_HINT)?
            }
            MenuChoice::Unrecognized(raw) => {
                debug!(input = %raw, "unrecognized assertion, using it as a custom statement");
                self.prompter.show(CUSTOM_FALLBACK_HINT)?;
                draft.kind = ActionKind::Custom;
                draft.custom_statement = Some(raw);
            }
        }
        Ok(())
    }

    fn select_category(&mut self) -> Result<Category, GenError> {
        let menu = category_menu();
        self.prompter.show(&menu.render())?;

        loop {
            let raw = self.prompter.ask("Select category")?;
            match menu.parse(&raw) {
                MenuChoice::Selected(category) => return Ok(category),
                MenuChoice::Unrecognized(_) if self.options.strict_menus => {
                    self.prompter.show(UNKNOWN_SELECTION_HINT)?
                }
                MenuChoice::Unrecognized(raw) => {
                    debug!(input = %raw, "unrecognized category, using the default");
                    self.prompter
                        .show(&format!("  Using '{}'.", Category::default()))?;
                    return Ok(Category::default());
                }
                MenuChoice::Empty => return Ok(Category::default()),
            }
        }
    }

    // ========================================================================
    // Fields
    // ========================================================================

    /// Prompt for the field the encoder reported missing.
    fn fill_field(&mut self, draft: &mut StepDraft, field: StepField) -> Result<(), GenError> {
        match field {
            StepField::Description => draft.description = self.required(field.prompt())?,
            StepField::TargetRole => {
                let role = self.answer(field)?;
                // A combined "role name" answer already carries the name
                draft.name = match &role {
                    Some(r) if !r.contains(char::is_whitespace) => {
                        Some(self.prompter.ask("Accessible name (optional)")?)
                    }
                    _ => None,
                };
                draft.role = role;
            }
            StepField::FillValue => draft.fill_value = self.answer(field)?,
            StepField::Assertion => self.select_assertion(draft)?,
            StepField::AssertionExpected => draft.expected = self.answer(field)?,
            StepField::NavigateTarget => draft.navigate_target = self.answer(field)?,
            StepField::ScreenshotName => draft.screenshot_name = self.answer(field)?,
            StepField::CustomStatement => draft.custom_statement = self.answer(field)?,
        }
        Ok(())
    }

    /// Ask once for a step field. Empty input yields `None` and a hint; the
    /// encoder will report the field missing again.
    fn answer(&mut self, field: StepField) -> Result<Option<String>, GenError> {
        let value = self.prompter.ask(field.prompt())?;
        if value.is_empty() {
            self.prompter.show(REQUIRED_HINT)?;
            Ok(None)
        } else {
            Ok(Some(value))
        }
    }

    /// Ask until a non-empty answer is given.
    fn required(&mut self, label: &str) -> Result<String, GenError> {
        loop {
            let value = self.prompter.ask(label)?;
            if !value.is_empty() {
                return Ok(value);
            }
            self.prompter.show(REQUIRED_HINT)?;
        }
    }

    /// Ask once; empty input means absent.
    fn optional(&mut self, label: &str) -> Result<Option<String>, GenError> {
        let value = self.prompter.ask(label)?;
        Ok(if value.is_empty() { None } else { Some(value) })
    }
}
