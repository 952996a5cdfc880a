use std::io::{BufRead, Write};

use tracing::warn;

use crate::application::ConfirmationPrompt;

/// Asks on stdout and reads a `y`/`yes` answer from stdin.
pub struct StdinConfirmation;

impl ConfirmationPrompt for StdinConfirmation {
    fn confirm(&self, question: &str) -> bool {
        print!("{question} [y/N] ");
        if let Err(e) = std::io::stdout().flush() {
            warn!("Failed to flush confirmation prompt: {}", e);
        }

        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(e) => {
                warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}

/// Answers every question with a fixed value (`--yes`, tests).
pub struct AutoConfirm(pub bool);

impl ConfirmationPrompt for AutoConfirm {
    fn confirm(&self, _question: &str) -> bool {
        self.0
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
