//! Rule definitions and the context they run in

use std::fmt;
use std::sync::Arc;

use futures::future::LocalBoxFuture;

use crate::config::Options;
use crate::error::{Diagnostics, EngineError};
use crate::field::{field_label, FieldAdapter, FormAdapter};
use crate::lang::Lang;
use crate::session::Session;

/// Event that started a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Keystroke-level edits; only rules that opt in run
    Input,
    Change,
    Blur,
    Focus,
    Submit,
    /// Programmatic validation
    Manual,
}

/// What a rule decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    /// Failed; the message comes from configuration
    Fail,
    /// Failed with a message built for this call
    FailWith(String),
    /// The rule's own input (a format, range or target) was unusable
    Unconfirmed,
}

impl Verdict {
    pub fn from_bool(passed: bool) -> Self {
        if passed {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// Everything a rule may read while it runs
pub struct RuleContext<'a> {
    pub form: &'a dyn FormAdapter,
    pub field: &'a dyn FieldAdapter,
    /// The field's effective value at the start of the rule
    pub value: &'a str,
    pub trigger: Trigger,
    pub options: &'a Options,
    pub lang: &'a Lang,
    pub session: &'a Session,
    pub(crate) diagnostics: &'a Diagnostics,
}

impl<'a> RuleContext<'a> {
    /// Non-blank attribute value
    pub fn attr(&self, name: &str) -> Option<String> {
        self.field
            .attribute(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Whether a flag attribute is present and not `"false"`
    pub fn flag(&self, name: &str) -> bool {
        self.field
            .attribute(name)
            .is_some_and(|value| !value.trim().eq_ignore_ascii_case("false"))
    }

    /// Field named by `attribute`
    ///
    /// `None` when the attribute is absent; a name that matches no field is
    /// also reported as [`EngineError::MissingTarget`].
    pub fn target(&self, attribute: &str) -> Option<&'a dyn FieldAdapter> {
        let name = self.attr(attribute)?;
        let target = self.form.field(&name);
        if target.is_none() {
            self.report(EngineError::MissingTarget {
                field: self.field.id().to_string(),
                attribute: attribute.to_string(),
                target: name,
            });
        }
        target
    }

    pub fn label_of(&self, field: &dyn FieldAdapter) -> String {
        field_label(field, &self.options.attributes.label)
    }

    /// Message from the language table
    pub fn message(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.lang.message(key, args)
    }

    pub fn fail_with(&self, key: &str, args: &[(&str, &str)]) -> Verdict {
        Verdict::FailWith(self.message(key, args))
    }

    pub fn report(&self, error: EngineError) {
        self.diagnostics.report(error);
    }
}

pub type ValidatorFn = Arc<dyn Fn(&RuleContext<'_>) -> Verdict + Send + Sync>;
pub type AsyncValidatorFn =
    Arc<dyn for<'a> Fn(&'a RuleContext<'a>) -> LocalBoxFuture<'a, Verdict> + Send + Sync>;
pub type ModifierFn = Arc<dyn Fn(&RuleContext<'_>) -> String + Send + Sync>;

/// A named rule: validator, async validator or modifier depending on `F`
#[derive(Clone)]
pub struct RuleDefinition<F> {
    pub name: String,
    pub run: F,
    pub invalid_message: String,
    /// Language key used instead of `name` when looking up the message
    pub message_key: Option<String>,
    pub valid_message: Option<String>,
    /// Run on [`Trigger::Input`] too
    pub triggers_on_input: bool,
}

pub type Validator = RuleDefinition<ValidatorFn>;
pub type AsyncValidator = RuleDefinition<AsyncValidatorFn>;
pub type Modifier = RuleDefinition<ModifierFn>;

impl<F> RuleDefinition<F> {
    fn with_run(name: impl Into<String>, invalid_message: impl Into<String>, run: F) -> Self {
        Self {
            name: name.into(),
            run,
            invalid_message: invalid_message.into(),
            message_key: None,
            valid_message: None,
            triggers_on_input: false,
        }
    }

    pub fn message_key(mut self, key: impl Into<String>) -> Self {
        self.message_key = Some(key.into());
        self
    }

    pub fn valid_message(mut self, message: impl Into<String>) -> Self {
        self.valid_message = Some(message.into());
        self
    }

    pub fn on_input(mut self) -> Self {
        self.triggers_on_input = true;
        self
    }

    /// Key for the language table
    pub fn lang_key(&self) -> &str {
        self.message_key.as_deref().unwrap_or(&self.name)
    }
}

impl Validator {
    pub fn new(
        name: impl Into<String>,
        invalid_message: impl Into<String>,
        run: impl Fn(&RuleContext<'_>) -> Verdict + Send + Sync + 'static,
    ) -> Self {
        Self::with_run(name, invalid_message, Arc::new(run))
    }
}

impl AsyncValidator {
    pub fn new(
        name: impl Into<String>,
        invalid_message: impl Into<String>,
        run: impl for<'a> Fn(&'a RuleContext<'a>) -> LocalBoxFuture<'a, Verdict> + Send + Sync + 'static,
    ) -> Self {
        Self::with_run(name, invalid_message, Arc::new(run))
    }
}

impl Modifier {
    pub fn new(
        name: impl Into<String>,
        run: impl Fn(&RuleContext<'_>) -> String + Send + Sync + 'static,
    ) -> Self {
        Self::with_run(name, "", Arc::new(run))
    }
}

impl<F> fmt::Debug for RuleDefinition<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDefinition")
            .field("name", &self.name)
            .field("invalid_message", &self.invalid_message)
            .field("message_key", &self.message_key)
            .field("valid_message", &self.valid_message)
            .field("triggers_on_input", &self.triggers_on_input)
            .finish_non_exhaustive()
    }
}
