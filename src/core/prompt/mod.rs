mod types;

pub use types::*;

use crate::tty;
use std::io::{self, BufRead, Write};

/// Seam for interactive prompting so workflows can run against scripted
/// answers in tests.
pub trait Prompter {
    /// Run a select prompt. `None` means the prompt was interrupted or the
    /// answer was unusable and no default applies.
    fn select(&self, prompt: &SelectPrompt) -> Option<String>;

    /// Run a yes/no prompt. Interruptions resolve to the prompt's default.
    fn yes_no(&self, prompt: &YesNoPrompt) -> bool;
}

/// Data-driven interactive prompt engine.
/// Handles TTY detection and provides consistent prompting behavior.
pub struct PromptEngine {
    interactive: bool,
}

impl PromptEngine {
    /// Create engine with automatic TTY detection.
    pub fn new() -> Self {
        Self {
            interactive: tty::require_tty_for_interactive(),
        }
    }

    /// Create engine with explicit interactive mode.
    pub fn with_interactive(interactive: bool) -> Self {
        Self { interactive }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }
}

impl Prompter for PromptEngine {
    fn yes_no(&self, prompt: &YesNoPrompt) -> bool {
        if !self.interactive {
            return prompt.default;
        }

        let suffix = if prompt.default { "[Y/n]" } else { "[y/N]" };
        eprint!("{} {}: ", prompt.question, suffix);
        io::stderr().flush().ok();

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input).is_err() {
            return prompt.default;
        }

        let trimmed = input.trim().to_lowercase();
        if trimmed.is_empty() {
            return prompt.default;
        }

        trimmed.starts_with('y')
    }

    fn select(&self, prompt: &SelectPrompt) -> Option<String> {
        if !self.interactive {
            return prompt
                .default_index
                .and_then(|i| prompt.options.get(i))
                .map(|o| o.value.clone());
        }

        eprintln!("{}", prompt.question);
        for (i, opt) in prompt.options.iter().enumerate() {
            let marker = if Some(i) == prompt.default_index {
                "*"
            } else {
                " "
            };
            eprintln!("  {}[{}] {}", marker, i + 1, opt.label);
        }

        eprint!("Enter choice (1-{}): ", prompt.options.len());
        io::stderr().flush().ok();

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input).is_err() {
            return prompt
                .default_index
                .and_then(|i| prompt.options.get(i))
                .map(|o| o.value.clone());
        }

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return prompt
                .default_index
                .and_then(|i| prompt.options.get(i))
                .map(|o| o.value.clone());
        }

        trimmed
            .parse::<usize>()
            .ok()
            .and_then(|n| prompt.options.get(n.saturating_sub(1)))
            .map(|o| o.value.clone())
    }
}

impl Default for PromptEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_interactive_yes_no_uses_default() {
        let engine = PromptEngine::with_interactive(false);
        assert!(engine.yes_no(&YesNoPrompt {
            question: "Proceed?".to_string(),
            default: true,
        }));
        assert!(!engine.yes_no(&YesNoPrompt {
            question: "Proceed?".to_string(),
            default: false,
        }));
    }

    #[test]
    fn non_interactive_select_without_default_is_none() {
        let engine = PromptEngine::with_interactive(false);
        let prompt = SelectPrompt {
            question: "Pick one".to_string(),
            options: vec![SelectOption {
                value: "a".to_string(),
                label: "A".to_string(),
            }],
            default_index: None,
        };
        assert_eq!(engine.select(&prompt), None);
    }

    #[test]
    fn non_interactive_select_resolves_default() {
        let engine = PromptEngine::with_interactive(false);
        let prompt = SelectPrompt {
            question: "Pick one".to_string(),
            options: vec![
                SelectOption {
                    value: "a".to_string(),
                    label: "A".to_string(),
                },
                SelectOption {
                    value: "b".to_string(),
                    label: "B".to_string(),
                },
            ],
            default_index: Some(1),
        };
        assert_eq!(engine.select(&prompt), Some("b".to_string()));
    }
}
