//! Errors raised by the key handler

use thiserror::Error;

/// Registration failed because some of the new combos are already bound.
///
/// Carries every colliding combo so all conflicts can be reported at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot bind \"{usage}\": {} already bound", .combos.join(", "))]
pub struct BindingConflictError {
    usage: String,
    combos: Vec<String>,
}

impl BindingConflictError {
    pub(crate) fn new(usage: String, combos: Vec<String>) -> Self {
        Self { usage, combos }
    }

    /// Usage text of the binding that failed to register
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Rendered text of each colliding combo, in declaration order
    pub fn combos(&self) -> &[String] {
        &self.combos
    }
}
