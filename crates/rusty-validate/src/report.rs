// File: src/report.rs
// Purpose: Results of per-field and whole-form passes

use std::collections::HashMap;

use crate::render::RuleOutcome;

/// Where a per-field pass stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassState {
    Pending,
    /// Evaluating the rule at this position of the field's rule list
    Running(usize),
    Passed,
    Failed,
    /// Gated or ignored; no rule ran
    Skipped,
}

/// Result of one per-field pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReport {
    /// Field id
    pub field: String,
    pub state: PassState,
    /// One entry per evaluated rule, in evaluation order
    pub outcomes: Vec<RuleOutcome>,
}

impl FieldReport {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            state: PassState::Pending,
            outcomes: Vec::new(),
        }
    }

    pub fn skipped(field: impl Into<String>) -> Self {
        Self {
            state: PassState::Skipped,
            ..Self::new(field)
        }
    }

    /// Did not fail (skipped fields count as passing)
    pub fn passed(&self) -> bool {
        !self.failed()
    }

    pub fn failed(&self) -> bool {
        self.state == PassState::Failed
    }

    /// Message of the failing rule
    pub fn error(&self) -> Option<&str> {
        self.outcomes
            .iter()
            .find(|outcome| !outcome.passed)
            .map(|outcome| outcome.message.as_str())
    }
}

/// Result of a whole-form pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormReport {
    pub form: String,
    pub passed: bool,
    /// Reports of the eligible fields, in document order
    pub fields: Vec<FieldReport>,
}

impl FormReport {
    pub fn field(&self, id: &str) -> Option<&FieldReport> {
        self.fields.iter().find(|report| report.field == id)
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(FieldReport::failed)
    }

    /// Failure messages keyed by field id
    pub fn errors(&self) -> HashMap<String, Vec<String>> {
        self.fields
            .iter()
            .filter_map(|report| {
                report
                    .error()
                    .map(|message| (report.field.clone(), vec![message.to_string()]))
            })
            .collect()
    }

    /// Get the error for a specific field
    pub fn get_error(&self, id: &str) -> Option<&str> {
        self.field(id).and_then(FieldReport::error)
    }
}
