// File: src/error.rs
// Purpose: Non-fatal engine diagnostics and the image decode error

use std::cell::RefCell;
use std::fmt;
use std::time::Duration;

/// Which registry a rule lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Validator,
    AsyncValidator,
    Modifier,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RuleKind::Validator => "validator",
            RuleKind::AsyncValidator => "async validator",
            RuleKind::Modifier => "modifier",
        })
    }
}

/// Configuration and runtime problems the engine reports without aborting a pass
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("{kind} `{name}` is already registered")]
    DuplicateRule { kind: RuleKind, name: String },

    #[error("field `{field}` references unknown rule `{name}`")]
    UnknownRule { field: String, name: String },

    #[error("field `{field}`: `{attribute}` points at missing field `{target}`")]
    MissingTarget {
        field: String,
        attribute: String,
        target: String,
    },

    #[error("rule `{rule}` panicked while validating field `{field}`")]
    RulePanicked { field: String, rule: String },

    #[error("async rule `{rule}` on field `{field}` timed out after {after:?}")]
    AsyncTimeout {
        field: String,
        rule: String,
        after: Duration,
    },

    #[error("async rule `{rule}` on field `{field}` ran without a timeout: no Tokio runtime")]
    TimerUnavailable { field: String, rule: String },

    #[error("field `{field}` has an invalid pattern `{pattern}`: {reason}")]
    InvalidPattern {
        field: String,
        pattern: String,
        reason: String,
    },
}

/// Failure to read pixel dimensions from a selected file
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("`{0}` is not an image")]
    NotAnImage(String),

    #[error("could not decode `{name}`: {reason}")]
    Corrupt { name: String, reason: String },
}

/// Per-engine diagnostic sink
///
/// Reports are logged as they arrive and kept until drained.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: RefCell<Vec<EngineError>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self, error: EngineError) {
        tracing::warn!(%error, "validation diagnostic");
        self.entries.borrow_mut().push(error);
    }

    /// Drain everything reported so far
    pub fn take(&self) -> Vec<EngineError> {
        std::mem::take(&mut *self.entries.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EngineError::DuplicateRule {
            kind: RuleKind::AsyncValidator,
            name: "image_width".to_string(),
        };
        assert_eq!(err.to_string(), "async validator `image_width` is already registered");

        let err = EngineError::AsyncTimeout {
            field: "avatar".to_string(),
            rule: "image_dimension".to_string(),
            after: Duration::from_millis(250),
        };
        assert_eq!(
            err.to_string(),
            "async rule `image_dimension` on field `avatar` timed out after 250ms"
        );
    }

    #[test]
    fn test_diagnostics_drain() {
        let diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());

        diagnostics.report(EngineError::UnknownRule {
            field: "email".to_string(),
            name: "emial".to_string(),
        });
        assert_eq!(diagnostics.len(), 1);

        let drained = diagnostics.take();
        assert_eq!(drained.len(), 1);
        assert!(diagnostics.is_empty());
    }
}
