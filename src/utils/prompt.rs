//! Interactive prompts.
//!
//! Workflows ask questions through the [`Prompter`] trait so they can be
//! driven by a terminal in the binary and by scripted answers in tests.

use crate::core::IonicError;
use console::Term;
use std::io::{BufRead, IsTerminal, Write};

/// Source of interactive answers.
pub trait Prompter {
    /// Print an informational line to the user.
    fn message(&self, text: &str);

    /// Ask a yes/no question. Only `y`/`yes` count as yes.
    fn confirm(&self, question: &str) -> Result<bool, IonicError>;

    /// Read a line of visible input.
    fn input(&self, label: &str) -> Result<String, IonicError>;

    /// Read a line without echoing it.
    fn password(&self, label: &str) -> Result<String, IonicError>;
}

/// `true` for `y` or `yes`, ignoring case and surrounding whitespace.
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// [`Prompter`] backed by the process terminal.
///
/// Visible input is read from stdin line by line so answers can also be
/// piped. Passwords are read with echo disabled when stdin is a terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn read_line(label: &str) -> Result<String, IonicError> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{label}").and_then(|()| stdout.flush()).map_err(prompt_error)?;

        let mut line = String::new();
        let read = std::io::stdin().lock().read_line(&mut line).map_err(prompt_error)?;
        if read == 0 {
            return Err(IonicError::PromptFailed {
                reason: "stdin closed before an answer was given".to_string(),
            });
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl Prompter for TerminalPrompter {
    fn message(&self, text: &str) {
        println!("{text}");
    }

    fn confirm(&self, question: &str) -> Result<bool, IonicError> {
        println!("{question}");
        let answer = Self::read_line("(yes/no): ")?;
        Ok(is_affirmative(&answer))
    }

    fn input(&self, label: &str) -> Result<String, IonicError> {
        Self::read_line(label)
    }

    fn password(&self, label: &str) -> Result<String, IonicError> {
        if !std::io::stdin().is_terminal() {
            return Self::read_line(label);
        }
        let term = Term::stdout();
        term.write_str(label).map_err(prompt_error)?;
        term.read_secure_line().map_err(prompt_error)
    }
}

fn prompt_error(e: std::io::Error) -> IonicError {
    IonicError::PromptFailed {
        reason: e.to_string(),
    }
}
