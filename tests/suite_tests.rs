use chrono::{DateTime, TimeZone, Utc};
use playwright_testgen::GenError;
use playwright_testgen::generator::assembler::{assemble_suite, join_url};
use playwright_testgen::generator::writer::{OutputTarget, sanitize_filename, write_suite};
use playwright_testgen::spec::spec_model::{
    Assertion, Category, Step, StepAction, Suite, TargetDescriptor, TestCase,
};
use playwright_testgen::spec::suite_file::{load_suite, save_suite, validate_suite};

// ============================================================================
// Helper builders
// ============================================================================

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap()
}

fn login_suite() -> Suite {
    Suite {
        feature_name: "login".into(),
        file_base_name: "login".into(),
        base_url: "http://localhost:3000".into(),
        category: Category::Functional,
        describe_title: "Login Page".into(),
        initial_path: "/login".into(),
        additional_setup: None,
        test_cases: vec![TestCase {
            title: "displays login form".into(),
            objective: "verify form renders".into(),
            steps: vec![Step {
                description: "check heading".into(),
                action: StepAction::Verify {
                    assertion: Assertion::Visible {
                        target: TargetDescriptor::new("heading", "Login"),
                    },
                },
            }],
        }],
    }
}

fn empty_suite() -> Suite {
    Suite {
        test_cases: Vec::new(),
        ..login_suite()
    }
}

// ============================================================================
// Assembly
// ============================================================================

#[test]
fn login_scenario_assembles_expected_file() {
    let output = assemble_suite(&login_suite(), fixed_time());

    let expected = "\
import { test, expect } from '@playwright/test';

/**
 * Login Page
 *
 * Category: Functional
 * Feature: login
 * Generated: 2026-01-15T09:30:00Z
 */

test.describe('Login Page', () => {
  test.beforeEach(async ({ page }) => {
    await page.goto('http://localhost:3000/login');
  });

  test('displays login form', async ({ page }) => {
    // Objective: verify form renders
    await test.step('displays login form', async () => {
      // check heading
      await expect(page.getByRole('heading', { name: 'Login' })).toBeVisible();
    });
  });
});
";
    assert_eq!(output, expected);
}

#[test]
fn empty_suite_has_structurally_valid_describe_block() {
    let output = assemble_suite(&empty_suite(), fixed_time());

    assert!(output.contains("test.describe('Login Page', () => {\n"));
    assert!(output.contains("test.beforeEach("));
    assert!(!output.contains("  test('"));
    assert!(output.ends_with("  });\n});\n"));
    assert_eq!(output.matches('{').count(), output.matches('}').count());
}

#[test]
fn additional_setup_follows_navigation() {
    let suite = Suite {
        additional_setup: Some("await page.evaluate(() => localStorage.clear());".into()),
        ..login_suite()
    };
    let output = assemble_suite(&suite, fixed_time());
    assert!(output.contains(
        "    await page.goto('http://localhost:3000/login');\n    await page.evaluate(() => localStorage.clear());\n  });"
    ));
}

#[test]
fn header_lists_category_label() {
    let suite = Suite {
        category: Category::ApiIntegration,
        ..login_suite()
    };
    let output = assemble_suite(&suite, fixed_time());
    assert!(output.contains(" * Category: API Integration\n"));
}

#[test]
fn test_blocks_follow_collection_order() {
    let mut suite = login_suite();
    suite.test_cases.push(TestCase {
        title: "second case".into(),
        objective: "runs after the first".into(),
        steps: Vec::new(),
    });
    let output = assemble_suite(&suite, fixed_time());

    let first = output.find("test('displays login form'").unwrap();
    let second = output.find("test('second case'").unwrap();
    assert!(first < second);
    assert!(output.contains("    await test.step('second case', async () => {\n    });\n"));
}

#[test]
fn titles_are_quoted_safely() {
    let mut suite = login_suite();
    suite.describe_title = "User's */ page".into();
    let output = assemble_suite(&suite, fixed_time());
    assert!(output.contains("test.describe('User\\'s */ page', () => {"));
    assert!(output.contains(" * User's * / page\n"));
}

#[test]
fn same_input_and_timestamp_assemble_identically() {
    let suite = login_suite();
    assert_eq!(
        assemble_suite(&suite, fixed_time()),
        assemble_suite(&suite.clone(), fixed_time())
    );
}

#[test]
fn only_timestamp_line_differs_between_runs() {
    let suite = login_suite();
    let a = assemble_suite(&suite, fixed_time());
    let b = assemble_suite(&suite, Utc.with_ymd_and_hms(2027, 6, 1, 0, 0, 0).unwrap());

    let differing: Vec<(&str, &str)> = a
        .lines()
        .zip(b.lines())
        .filter(|(x, y)| x != y)
        .collect();
    assert_eq!(differing.len(), 1);
    assert!(differing[0].0.starts_with(" * Generated: "));
}

#[test]
fn join_url_uses_exactly_one_slash() {
    assert_eq!(join_url("http://localhost:3000", "/login"), "http://localhost:3000/login");
    assert_eq!(join_url("http://localhost:3000/", "/login"), "http://localhost:3000/login");
    assert_eq!(join_url("http://localhost:3000", "login"), "http://localhost:3000/login");
    assert_eq!(join_url("http://localhost:3000/", "/"), "http://localhost:3000/");
}

// ============================================================================
// Writing
// ============================================================================

#[test]
fn write_suite_creates_directory_and_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = OutputTarget {
        directory: dir.path().join("tests").join("e2e"),
        extension: "spec.ts".into(),
    };

    let path = write_suite(&login_suite(), &target, fixed_time()).unwrap();

    assert_eq!(path, dir.path().join("tests/e2e/login.spec.ts"));
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, assemble_suite(&login_suite(), fixed_time()));
}

#[test]
fn rewriting_overwrites_with_identical_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let target = OutputTarget {
        directory: dir.path().to_path_buf(),
        extension: ".spec.ts".into(),
    };

    let first = write_suite(&login_suite(), &target, fixed_time()).unwrap();
    let before = std::fs::read(&first).unwrap();
    let second = write_suite(&login_suite(), &target, fixed_time()).unwrap();

    assert_eq!(first, second);
    assert_eq!(before, std::fs::read(&second).unwrap());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn unwritable_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "file").unwrap();

    let target = OutputTarget {
        directory: blocker.join("nested"),
        extension: "spec.ts".into(),
    };
    let err = write_suite(&login_suite(), &target, fixed_time()).unwrap_err();
    assert!(matches!(err, GenError::Write { .. }));
}

#[test]
fn output_path_uses_sanitized_base_name() {
    let target = OutputTarget::default();
    assert_eq!(
        target.path_for("../checkout flow"),
        std::path::PathBuf::from("tests/e2e/.._checkout_flow.spec.ts")
    );
    assert_eq!(sanitize_filename("user-profile_v2"), "user-profile_v2");
    assert_eq!(sanitize_filename(".."), "__");
}

// ============================================================================
// Suite files
// ============================================================================

#[test]
fn suite_file_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("suites").join("login.yaml");

    save_suite(&login_suite(), &path).unwrap();
    let loaded = load_suite(&path).unwrap();
    assert_eq!(loaded, login_suite());
}

#[test]
fn suite_file_rejects_blank_step_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(
        &path,
        r#"
feature_name: checkout
file_base_name: checkout
base_url: http://localhost:3000
describe_title: Checkout
initial_path: /cart
test_cases:
  - title: pays
    objective: completes payment
    steps:
      - description: enter card
        action: fill
        target:
          role: textbox
          name: Card number
        value: ""
"#,
    )
    .unwrap();

    match load_suite(&path) {
        Err(GenError::InvalidSuite(msg)) => assert!(msg.contains("value to fill"), "{}", msg),
        other => panic!("Expected InvalidSuite, got {:?}", other),
    }
}

#[test]
fn suite_file_category_defaults_to_functional() {
    let yaml = "feature_name: f\nfile_base_name: f\nbase_url: http://x\ndescribe_title: F\ninitial_path: /\n";
    let suite: Suite = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(suite.category, Category::Functional);
    assert!(suite.test_cases.is_empty());
    assert!(validate_suite(&suite).is_ok());
}

#[test]
fn validate_suite_requires_header_fields() {
    let suite = Suite {
        file_base_name: " ".into(),
        ..login_suite()
    };
    match validate_suite(&suite) {
        Err(GenError::InvalidSuite(msg)) => assert!(msg.contains("file_base_name")),
        other => panic!("Expected InvalidSuite, got {:?}", other),
    }
}

#[test]
fn missing_suite_file_is_an_error() {
    let err = load_suite(std::path::Path::new("does/not/exist.yaml")).unwrap_err();
    assert!(matches!(err, GenError::SuiteFile { .. }));
}

#[test]
fn suite_file_accepts_unquoted_scalars_in_steps() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pin.yaml");
    std::fs::write(
        &path,
        r#"
feature_name: unlock
file_base_name: unlock
base_url: http://localhost:3000
describe_title: Unlock
initial_path: /lock
test_cases:
  - title: 2024
    objective: enters the pin
    steps:
      - description: enter pin
        action: fill
        target:
          role: textbox
          name: 1234
        value: 1234
      - description: check balance
        action: verify
        assertion:
          type: has_text
          target:
            role: status
          expected: 42
      - description: keep the toggle on
        action: verify
        assertion:
          type: has_text
          target:
            role: switch
          expected: true
"#,
    )
    .unwrap();

    let suite = load_suite(&path).expect("unquoted scalars should load");
    let steps = &suite.test_cases[0].steps;
    assert_eq!(suite.test_cases[0].title, "2024");
    assert_eq!(
        steps[0].action,
        StepAction::Fill {
            target: TargetDescriptor::new("textbox", "1234"),
            value: "1234".into(),
        }
    );
    assert_eq!(
        steps[1].action,
        StepAction::Verify {
            assertion: Assertion::HasText {
                target: TargetDescriptor::new("status", ""),
                expected: "42".into(),
            }
        }
    );
    assert_eq!(
        steps[2].action,
        StepAction::Verify {
            assertion: Assertion::HasText {
                target: TargetDescriptor::new("switch", ""),
                expected: "true".into(),
            }
        }
    );
}

#[test]
fn suite_file_rejects_mapping_in_step_text_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(
        &path,
        "feature_name: f\nfile_base_name: f\nbase_url: http://x\ndescribe_title: F\ninitial_path: /\n\
         test_cases:\n  - title: t\n    objective: o\n    steps:\n      - description: go\n        action: navigate\n        path:\n          nested: true\n",
    )
    .unwrap();

    assert!(matches!(load_suite(&path), Err(GenError::SuiteParse { .. })));
}

#[test]
fn additional_setup_keeps_relative_indentation() {
    let suite = Suite {
        additional_setup: Some(
            "await page.route('**/api/*', route => {\n  route.fulfill({ status: 200 });\n});".into(),
        ),
        ..login_suite()
    };
    let output = assemble_suite(&suite, fixed_time());
    assert!(output.contains(
        "    await page.route('**/api/*', route => {\n      route.fulfill({ status: 200 });\n    });\n  });"
    ));
}
