//! Message renderer contract
//!
//! The engine reports every rule outcome and every whole-form verdict to a
//! [`MessageRenderer`]. Where and how messages appear (inline, at the top of
//! the form, styled, scrolled into view) is entirely up to the renderer.

use std::cell::RefCell;

use crate::field::{FieldAdapter, FormAdapter};

/// Result of one rule on one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub rule: String,
    pub passed: bool,
    pub message: String,
}

impl RuleOutcome {
    pub fn pass(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            passed: true,
            message: message.into(),
        }
    }

    pub fn fail(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            passed: false,
            message: message.into(),
        }
    }
}

/// Points in a per-field pass a renderer may hook into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    BeforeValidate,
    Valid { rule: String },
    Invalid { rule: String },
    AfterValidate { passed: bool },
}

pub trait MessageRenderer {
    /// Called once per evaluated rule
    fn on_outcome(&self, form: &dyn FormAdapter, field: &dyn FieldAdapter, outcome: &RuleOutcome);

    /// Called once per whole-form pass
    fn on_form_outcome(&self, form: &dyn FormAdapter, passed: bool);

    fn on_lifecycle(&self, _form: &dyn FormAdapter, _field: &dyn FieldAdapter, _event: &LifecycleEvent) {}

    /// A field went back to the skipped state; drop whatever was shown for it
    fn on_clear(&self, _form: &dyn FormAdapter, _field: &dyn FieldAdapter) {}
}

/// Renderer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRenderer;

impl MessageRenderer for NoopRenderer {
    fn on_outcome(&self, _form: &dyn FormAdapter, _field: &dyn FieldAdapter, _outcome: &RuleOutcome) {}

    fn on_form_outcome(&self, _form: &dyn FormAdapter, _passed: bool) {}
}

/// One captured renderer call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    Outcome { field: String, outcome: RuleOutcome },
    Form { form: String, passed: bool },
    Lifecycle { field: String, event: LifecycleEvent },
    Clear { field: String },
}

/// Renderer that records every call, keyed by field id
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    events: RefCell<Vec<RenderEvent>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RenderEvent> {
        self.events.borrow().clone()
    }

    /// Rule outcomes in the order they were rendered
    pub fn outcomes(&self) -> Vec<(String, RuleOutcome)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                RenderEvent::Outcome { field, outcome } => Some((field.clone(), outcome.clone())),
                _ => None,
            })
            .collect()
    }

    /// Messages of failed outcomes for one field
    pub fn errors_for(&self, field: &str) -> Vec<String> {
        self.outcomes()
            .into_iter()
            .filter(|(id, outcome)| id == field && !outcome.passed)
            .map(|(_, outcome)| outcome.message)
            .collect()
    }

    /// Verdicts of whole-form passes
    pub fn form_outcomes(&self) -> Vec<bool> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                RenderEvent::Form { passed, .. } => Some(*passed),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn push(&self, event: RenderEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl MessageRenderer for RecordingRenderer {
    fn on_outcome(&self, _form: &dyn FormAdapter, field: &dyn FieldAdapter, outcome: &RuleOutcome) {
        self.push(RenderEvent::Outcome {
            field: field.id().to_string(),
            outcome: outcome.clone(),
        });
    }

    fn on_form_outcome(&self, form: &dyn FormAdapter, passed: bool) {
        self.push(RenderEvent::Form {
            form: form.id().to_string(),
            passed,
        });
    }

    fn on_lifecycle(&self, _form: &dyn FormAdapter, field: &dyn FieldAdapter, event: &LifecycleEvent) {
        self.push(RenderEvent::Lifecycle {
            field: field.id().to_string(),
            event: event.clone(),
        });
    }

    fn on_clear(&self, _form: &dyn FormAdapter, field: &dyn FieldAdapter) {
        self.push(RenderEvent::Clear {
            field: field.id().to_string(),
        });
    }
}
