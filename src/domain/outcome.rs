//! Compilation outcome

/// Result of one compilation attempt as seen by listeners
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    Succeeded,
    Failed(String),
}

impl CompileOutcome {
    /// Error text for finish listeners; `None` on success
    pub fn error_message(&self) -> Option<&str> {
        match self {
            CompileOutcome::Succeeded => None,
            CompileOutcome::Failed(message) => Some(message),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CompileOutcome::Succeeded)
    }
}
