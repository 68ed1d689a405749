// File: src/engine.rs
// Purpose: Per-field and whole-form validation passes

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use futures::FutureExt;
use rusty_validate_core::CardBrand;
use tracing::{debug, trace};

use crate::config::Options;
use crate::error::{Diagnostics, EngineError};
use crate::field::{effective_value, field_label, FieldAdapter, FieldKind, FormAdapter};
use crate::lang::{fill, Lang};
use crate::registry::RuleRegistry;
use crate::render::{LifecycleEvent, MessageRenderer, RuleOutcome};
use crate::report::{FieldReport, FormReport, PassState};
use crate::rule::{AsyncValidator, Modifier, RuleContext, RuleDefinition, Trigger, Validator, Verdict};
use crate::rule_list::parse_rule_list;
use crate::session::Session;

/// The rule engine
///
/// Owns a rule registry, the options and messages it validates with, and
/// the per-field session state. Each engine is independent: rules
/// registered on one are never seen by another.
///
/// Passes are sequential. A field's rules run in list order and stop at
/// the first failure; async rules only run once every sync rule of the
/// field (or, for a whole-form pass, of the form) has passed.
pub struct Engine {
    pub(crate) registry: RuleRegistry,
    pub(crate) options: Options,
    pub(crate) lang: Lang,
    pub(crate) session: Session,
    pub(crate) diagnostics: Diagnostics,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Engine with the built-in rules, default options and English messages
    pub fn new() -> Self {
        Self::with_config(Options::default(), Lang::default())
    }

    pub fn with_config(options: Options, lang: Lang) -> Self {
        Self::with_registry(RuleRegistry::builtin(), options, lang)
    }

    pub fn with_registry(registry: RuleRegistry, options: Options, lang: Lang) -> Self {
        Self {
            registry,
            options,
            lang,
            session: Session::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn lang(&self) -> &Lang {
        &self.lang
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Add a validator; a taken name is reported and leaves the registry as is
    pub fn register_validator(&mut self, rule: Validator) -> bool {
        let result = self.registry.register_validator(rule);
        self.accept(result)
    }

    pub fn register_async_validator(&mut self, rule: AsyncValidator) -> bool {
        let result = self.registry.register_async_validator(rule);
        self.accept(result)
    }

    pub fn register_modifier(&mut self, rule: Modifier) -> bool {
        let result = self.registry.register_modifier(rule);
        self.accept(result)
    }

    fn accept(&self, result: Result<(), EngineError>) -> bool {
        match result {
            Ok(()) => true,
            Err(error) => {
                self.diagnostics.report(error);
                false
            }
        }
    }

    /// Exclude a field from (or return it to) validation
    pub fn set_ignored(&self, field_id: &str, ignored: bool) {
        self.session.update(field_id, |state| state.ignored = ignored);
    }

    /// Whether gating currently keeps the field from validating
    pub fn is_skipped(&self, field_id: &str) -> bool {
        self.session.get(field_id).skip
    }

    /// Brand detected by the field's last `credit_card` run
    pub fn card_brand(&self, field_id: &str) -> Option<CardBrand> {
        self.session.card_brand(field_id)
    }

    /// Unformatted value stored by the `currency` modifier
    pub fn original_value(&self, field_id: &str) -> Option<String> {
        self.session.original_value(field_id)
    }

    /// Drain the diagnostics reported so far
    pub fn take_diagnostics(&self) -> Vec<EngineError> {
        self.diagnostics.take()
    }

    /// The field's rule list in execution order
    ///
    /// Fields that declare a dependency or optionality get `required`
    /// prepended unless they already list it.
    pub fn field_rules(&self, field: &dyn FieldAdapter) -> Vec<String> {
        let attrs = &self.options.attributes;
        let mut rules = field
            .attribute(&attrs.validators)
            .map(|list| parse_rule_list(&list))
            .unwrap_or_default();

        if self.declares_gate(field) && !rules.iter().any(|rule| rule == "required") {
            rules.insert(0, "required".to_string());
        }
        rules
    }

    pub(crate) fn declares_gate(&self, field: &dyn FieldAdapter) -> bool {
        let attrs = &self.options.attributes;
        let depends = field
            .attribute(&attrs.depends_on)
            .is_some_and(|target| !target.trim().is_empty());
        let optional = field
            .attribute(&attrs.optional)
            .is_some_and(|flag| !flag.trim().eq_ignore_ascii_case("false"));
        depends || optional
    }

    /// Whether a whole-form pass includes the field
    pub fn is_eligible(&self, field: &dyn FieldAdapter) -> bool {
        let kind = field.kind();
        !kind.is_control()
            && (kind != FieldKind::Hidden || self.options.validate_hidden)
            && !self.session.is_excluded(field.id())
    }

    /// Eligible fields in document order, one entry per checkbox/radio group
    ///
    /// A group is represented by its first member that declares rules, or
    /// by its first member when none does.
    fn eligible_fields<'f>(&self, form: &'f dyn FormAdapter) -> Vec<&'f dyn FieldAdapter> {
        let mut fields: Vec<&'f dyn FieldAdapter> = Vec::new();
        let mut groups: HashMap<String, usize> = HashMap::new();
        for field in form.fields().into_iter().filter(|field| self.is_eligible(*field)) {
            if !field.kind().is_checkable() {
                fields.push(field);
                continue;
            }
            match groups.get(field.name()) {
                None => {
                    groups.insert(field.name().to_string(), fields.len());
                    fields.push(field);
                }
                Some(&slot) => {
                    if self.field_rules(fields[slot]).is_empty() && !self.field_rules(field).is_empty() {
                        fields[slot] = field;
                    }
                }
            }
        }
        fields
    }

    fn context<'a>(
        &'a self,
        form: &'a dyn FormAdapter,
        field: &'a dyn FieldAdapter,
        value: &'a str,
        trigger: Trigger,
    ) -> RuleContext<'a> {
        RuleContext {
            form,
            field,
            value,
            trigger,
            options: &self.options,
            lang: &self.lang,
            session: &self.session,
            diagnostics: &self.diagnostics,
        }
    }

    /// Synchronous per-field pass
    pub fn validate_field(
        &self,
        form: &dyn FormAdapter,
        field: &dyn FieldAdapter,
        trigger: Trigger,
        renderer: &dyn MessageRenderer,
    ) -> FieldReport {
        if self.session.is_excluded(field.id()) {
            trace!(field = field.id(), "field skipped");
            return FieldReport::skipped(field.id());
        }

        let rules = self.field_rules(field);
        let mut report = FieldReport::new(field.id());
        renderer.on_lifecycle(form, field, &LifecycleEvent::BeforeValidate);
        self.run_sync(form, field, trigger, &rules, renderer, &mut report);
        self.finish(form, field, renderer, &report);
        report
    }

    /// Per-field pass including async rules
    pub async fn validate_field_async(
        &self,
        form: &dyn FormAdapter,
        field: &dyn FieldAdapter,
        trigger: Trigger,
        renderer: &dyn MessageRenderer,
    ) -> FieldReport {
        if self.session.is_excluded(field.id()) {
            trace!(field = field.id(), "field skipped");
            return FieldReport::skipped(field.id());
        }

        let rules = self.field_rules(field);
        let mut report = FieldReport::new(field.id());
        renderer.on_lifecycle(form, field, &LifecycleEvent::BeforeValidate);
        self.run_sync(form, field, trigger, &rules, renderer, &mut report);
        if report.state == PassState::Passed {
            self.run_async(form, field, trigger, &rules, renderer, &mut report)
                .await;
        }
        self.finish(form, field, renderer, &report);
        report
    }

    /// Synchronous whole-form pass
    pub fn validate_form(
        &self,
        form: &dyn FormAdapter,
        trigger: Trigger,
        renderer: &dyn MessageRenderer,
    ) -> FormReport {
        let fields = self
            .eligible_fields(form)
            .into_iter()
            .map(|field| self.validate_field(form, field, trigger, renderer))
            .collect();
        self.conclude(form, fields, renderer)
    }

    /// Whole-form pass; async rules run field by field once the sync pass passed
    pub async fn validate_form_async(
        &self,
        form: &dyn FormAdapter,
        trigger: Trigger,
        renderer: &dyn MessageRenderer,
    ) -> FormReport {
        let mut passes: Vec<(&dyn FieldAdapter, Vec<String>, FieldReport)> = self
            .eligible_fields(form)
            .into_iter()
            .map(|field| {
                let rules = self.field_rules(field);
                let mut report = FieldReport::new(field.id());
                renderer.on_lifecycle(form, field, &LifecycleEvent::BeforeValidate);
                self.run_sync(form, field, trigger, &rules, renderer, &mut report);
                // Fields with async rules finish after the async phase
                if !self.has_async(&rules) {
                    self.finish(form, field, renderer, &report);
                }
                (field, rules, report)
            })
            .collect();

        let sync_passed = passes.iter().all(|(_, _, report)| report.passed());
        for (field, rules, report) in passes.iter_mut() {
            if !self.has_async(rules) {
                continue;
            }
            if sync_passed {
                self.run_async(form, *field, trigger, rules, renderer, report)
                    .await;
            }
            self.finish(form, *field, renderer, report);
        }

        let reports = passes.into_iter().map(|(_, _, report)| report).collect();
        self.conclude(form, reports, renderer)
    }

    fn has_async(&self, rules: &[String]) -> bool {
        rules.iter().any(|name| self.registry.async_validator(name).is_some())
    }

    /// Full async pass for a submit event; `true` lets the submission proceed
    pub async fn handle_submit(&self, form: &dyn FormAdapter, renderer: &dyn MessageRenderer) -> bool {
        let report = self
            .validate_form_async(form, Trigger::Submit, renderer)
            .await;
        if !report.passed {
            debug!(form = form.id(), errors = report.errors().len(), "submission blocked");
        }
        report.passed
    }

    /// Run the field's modifier list and write the result back
    pub fn apply_modifiers(&self, form: &dyn FormAdapter, field: &dyn FieldAdapter, trigger: Trigger) -> String {
        let original = field.value();
        let Some(list) = field.attribute(&self.options.attributes.modifiers) else {
            return original;
        };

        let mut value = original.clone();
        for name in parse_rule_list(&list) {
            let Some(modifier) = self.registry.modifier(&name) else {
                self.diagnostics.report(EngineError::UnknownRule {
                    field: field.id().to_string(),
                    name,
                });
                continue;
            };
            if trigger == Trigger::Input && !modifier.triggers_on_input {
                continue;
            }

            let result = {
                let ctx = self.context(form, field, &value, trigger);
                panic::catch_unwind(AssertUnwindSafe(|| (modifier.run)(&ctx)))
            };
            match result {
                Ok(modified) => value = modified,
                Err(_) => self.diagnostics.report(EngineError::RulePanicked {
                    field: field.id().to_string(),
                    rule: name,
                }),
            }
        }

        if value != original {
            trace!(field = field.id(), "modifiers changed value");
            field.set_value(&value);
        }
        value
    }

    fn run_sync(
        &self,
        form: &dyn FormAdapter,
        field: &dyn FieldAdapter,
        trigger: Trigger,
        rules: &[String],
        renderer: &dyn MessageRenderer,
        report: &mut FieldReport,
    ) {
        let value = effective_value(form, field);
        for (i, name) in rules.iter().enumerate() {
            let Some(rule) = self.registry.validator(name) else {
                if self.registry.async_validator(name).is_none() {
                    self.diagnostics.report(EngineError::UnknownRule {
                        field: field.id().to_string(),
                        name: name.clone(),
                    });
                }
                continue;
            };
            if trigger == Trigger::Input && !rule.triggers_on_input {
                continue;
            }

            report.state = PassState::Running(i);
            let ctx = self.context(form, field, &value, trigger);
            let verdict = self.invoke(&ctx, rule);
            if !self.record(&ctx, rule, verdict, renderer, report) {
                report.state = PassState::Failed;
                return;
            }
        }
        report.state = PassState::Passed;
    }

    async fn run_async(
        &self,
        form: &dyn FormAdapter,
        field: &dyn FieldAdapter,
        trigger: Trigger,
        rules: &[String],
        renderer: &dyn MessageRenderer,
        report: &mut FieldReport,
    ) {
        let value = effective_value(form, field);
        for (i, name) in rules.iter().enumerate() {
            let Some(rule) = self.registry.async_validator(name) else {
                continue;
            };
            if trigger == Trigger::Input && !rule.triggers_on_input {
                continue;
            }

            report.state = PassState::Running(i);
            let ctx = self.context(form, field, &value, trigger);
            let verdict = self.invoke_async(&ctx, rule).await;
            if !self.record(&ctx, rule, verdict, renderer, report) {
                report.state = PassState::Failed;
                return;
            }
        }
        report.state = PassState::Passed;
    }

    fn invoke(&self, ctx: &RuleContext<'_>, rule: &Validator) -> Verdict {
        panic::catch_unwind(AssertUnwindSafe(|| (rule.run)(ctx))).unwrap_or_else(|_| {
            self.rule_panicked(ctx, &rule.name);
            Verdict::Unconfirmed
        })
    }

    async fn invoke_async(&self, ctx: &RuleContext<'_>, rule: &AsyncValidator) -> Verdict {
        let future = match panic::catch_unwind(AssertUnwindSafe(|| (rule.run)(ctx))) {
            Ok(future) => AssertUnwindSafe(future).catch_unwind(),
            Err(_) => {
                self.rule_panicked(ctx, &rule.name);
                return Verdict::Unconfirmed;
            }
        };

        // The timer needs a Tokio runtime; other executors await untimed
        let timeout = match self.options.async_timeout() {
            Some(_) if tokio::runtime::Handle::try_current().is_err() => {
                self.diagnostics.report(EngineError::TimerUnavailable {
                    field: ctx.field.id().to_string(),
                    rule: rule.name.clone(),
                });
                None
            }
            timeout => timeout,
        };

        let result = match timeout {
            Some(after) => match tokio::time::timeout(after, future).await {
                Ok(result) => result,
                Err(_) => {
                    self.diagnostics.report(EngineError::AsyncTimeout {
                        field: ctx.field.id().to_string(),
                        rule: rule.name.clone(),
                        after,
                    });
                    return Verdict::Unconfirmed;
                }
            },
            None => future.await,
        };

        result.unwrap_or_else(|_| {
            self.rule_panicked(ctx, &rule.name);
            Verdict::Unconfirmed
        })
    }

    fn rule_panicked(&self, ctx: &RuleContext<'_>, rule: &str) {
        self.diagnostics.report(EngineError::RulePanicked {
            field: ctx.field.id().to_string(),
            rule: rule.to_string(),
        });
    }

    /// Render one outcome; returns whether the rule passed
    fn record<F>(
        &self,
        ctx: &RuleContext<'_>,
        rule: &RuleDefinition<F>,
        verdict: Verdict,
        renderer: &dyn MessageRenderer,
        report: &mut FieldReport,
    ) -> bool {
        let passed = verdict.passed();
        trace!(field = ctx.field.id(), rule = %rule.name, passed, "rule evaluated");

        let (event, outcome) = if passed {
            (
                LifecycleEvent::Valid {
                    rule: rule.name.clone(),
                },
                RuleOutcome::pass(&rule.name, self.valid_message(ctx.field, rule)),
            )
        } else {
            (
                LifecycleEvent::Invalid {
                    rule: rule.name.clone(),
                },
                RuleOutcome::fail(&rule.name, self.invalid_message(ctx.field, rule, verdict)),
            )
        };

        renderer.on_lifecycle(ctx.form, ctx.field, &event);
        renderer.on_outcome(ctx.form, ctx.field, &outcome);
        report.outcomes.push(outcome);
        passed
    }

    fn valid_message<F>(&self, field: &dyn FieldAdapter, rule: &RuleDefinition<F>) -> String {
        field
            .attribute(&self.options.attributes.valid_message)
            .filter(|message| !message.trim().is_empty())
            .or_else(|| rule.valid_message.clone())
            .unwrap_or_default()
    }

    /// Custom attribute, then the rule's own message, then the language
    /// table, then the definition's default
    fn invalid_message<F>(&self, field: &dyn FieldAdapter, rule: &RuleDefinition<F>, verdict: Verdict) -> String {
        if verdict == Verdict::Unconfirmed {
            return self.lang.message("unconfirmed", &[]);
        }

        let custom = field
            .attribute(&self.options.attributes.invalid_message)
            .filter(|message| !message.trim().is_empty());
        if let Some(message) = custom {
            return message;
        }

        if let Verdict::FailWith(message) = verdict {
            return message;
        }

        let label = field_label(field, &self.options.attributes.label);
        match self.lang.template(rule.lang_key()) {
            Some(template) => fill(template, &[("label", label.as_str())]),
            None if !rule.invalid_message.is_empty() => rule.invalid_message.clone(),
            None => self.lang.message("invalid", &[]),
        }
    }

    fn finish(
        &self,
        form: &dyn FormAdapter,
        field: &dyn FieldAdapter,
        renderer: &dyn MessageRenderer,
        report: &FieldReport,
    ) {
        let passed = report.passed();
        renderer.on_lifecycle(form, field, &LifecycleEvent::AfterValidate { passed });
        debug!(field = field.id(), passed, rules = report.outcomes.len(), "field validated");
    }

    fn conclude(&self, form: &dyn FormAdapter, fields: Vec<FieldReport>, renderer: &dyn MessageRenderer) -> FormReport {
        let passed = fields.iter().all(FieldReport::passed);
        renderer.on_form_outcome(form, passed);
        debug!(form = form.id(), passed, fields = fields.len(), "form validated");
        FormReport {
            form: form.id().to_string(),
            passed,
            fields,
        }
    }
}
