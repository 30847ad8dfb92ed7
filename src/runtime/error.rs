/// Errors raised while applying a selected option
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuntimeError {
    /// The presentation layer asked for an option the current node lacks
    #[error("option {index} is out of range: the current choice has {len} option(s)")]
    OptionOutOfRange { index: usize, len: usize },

    /// An item key in the script does not resolve in the catalog; `line` is
    /// the `get`/`remove` line
    #[error("unknown item '{key}' at line {}", .line + 1)]
    UnknownItem { key: String, line: usize },
}

impl RuntimeError {
    /// Script line the error points at, if it has one
    pub fn line(&self) -> Option<usize> {
        match self {
            RuntimeError::OptionOutOfRange { .. } => None,
            RuntimeError::UnknownItem { line, .. } => Some(*line),
        }
    }
}
