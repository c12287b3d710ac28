use crate::spec::spec_model::{ActionKind, AssertionKind, Category};

/// Outcome of reading a numbered-menu answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice<T> {
    Selected(T),
    /// Non-empty input matching no option; carries the raw text
    Unrecognized(String),
    Empty,
}

/// A closed numbered menu over a fixed set of options.
pub struct Menu<T: Copy + 'static> {
    pub title: &'static str,
    pub options: &'static [T],
    label: fn(&T) -> &'static str,
}

impl<T: Copy + 'static> Menu<T> {
    /// Render the menu as display text:
    /// ```text
    /// Action:
    ///   1) Click
    ///   2) Fill
    /// ```
    pub fn render(&self) -> String {
        let mut out = format!("{}:", self.title);
        for (i, option) in self.options.iter().enumerate() {
            out.push_str(&format!("\n  {}) {}", i + 1, (self.label)(option)));
        }
        out
    }

    /// Match an answer by 1-based number or by option name. Names compare
    /// case-insensitively with punctuation and spaces ignored, so `has_text`,
    /// `Has text` and `hastext` all select the same option.
    pub fn parse(&self, raw: &str) -> MenuChoice<T> {
        let raw = raw.trim();
        if raw.is_empty() {
            return MenuChoice::Empty;
        }

        if let Ok(n) = raw.parse::<usize>() {
            return match n.checked_sub(1).and_then(|i| self.options.get(i)) {
                Some(option) => MenuChoice::Selected(*option),
                None => MenuChoice::Unrecognized(raw.to_string()),
            };
        }

        let wanted = normalize(raw);
        self.options
            .iter()
            .find(|option| normalize((self.label)(*option)) == wanted)
            .map(|option| MenuChoice::Selected(*option))
            .unwrap_or_else(|| MenuChoice::Unrecognized(raw.to_string()))
    }
}

fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn action_menu() -> Menu<ActionKind> {
    Menu {
        title: "Action",
        options: &ActionKind::ALL,
        label: ActionKind::label,
    }
}

pub fn assertion_menu() -> Menu<AssertionKind> {
    Menu {
        title: "Assertion",
        options: &AssertionKind::ALL,
        label: AssertionKind::label,
    }
}

pub fn category_menu() -> Menu<Category> {
    Menu {
        title: "Test category",
        options: &Category::ALL,
        label: Category::label,
    }
}
