/// A blocking yes/no question put to the user.
pub trait ConfirmationPrompt: Send + Sync {
    fn confirm(&self, question: &str) -> bool;
}
