//! Built-in rule set
//!
//! Every built-in is a plain function over a [`crate::rule::RuleContext`]:
//! it reads its settings from the field's attributes, delegates the check
//! to `rusty_validate_core` and builds its own message when the language
//! table entry needs values filled in.

mod basic;
mod files;
mod identity;
mod modifiers;
mod network;
mod numbers;

use crate::registry::RuleRegistry;
use crate::rule::{AsyncValidator, Modifier, Validator};

fn validators() -> Vec<Validator> {
    let mut rules = Vec::new();
    rules.extend(basic::validators());
    rules.extend(numbers::validators());
    rules.extend(network::validators());
    rules.extend(identity::validators());
    rules.extend(files::validators());
    rules
}

fn async_validators() -> Vec<AsyncValidator> {
    files::async_validators()
}

fn modifier_rules() -> Vec<Modifier> {
    modifiers::modifiers()
}

/// Register the built-in rules
pub(crate) fn install(registry: &mut RuleRegistry) {
    let mut results = Vec::new();
    for rule in validators() {
        results.push(registry.register_validator(rule));
    }
    for rule in async_validators() {
        results.push(registry.register_async_validator(rule));
    }
    for rule in modifier_rules() {
        results.push(registry.register_modifier(rule));
    }

    for error in results.into_iter().filter_map(Result::err) {
        tracing::warn!(%error, "built-in rule not installed");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::field::FieldAdapter;
    use crate::memory::{MemoryField, MemoryForm};
    use crate::render::NoopRenderer;
    use crate::report::FieldReport;
    use crate::rule::Trigger;
    use crate::Engine;

    /// Validate one field of `form` with a fresh engine
    pub(crate) fn run(form: &MemoryForm, id: &str) -> FieldReport {
        let field = form.get(id).expect("field under test");
        Engine::new().validate_field(form, field, Trigger::Manual, &NoopRenderer)
    }

    /// Failure message of a lone field, `None` when it passes
    pub(crate) fn error_of(field: MemoryField) -> Option<String> {
        let id = field.id().to_string();
        let form = MemoryForm::new("test").with_field(field);
        run(&form, &id).error().map(str::to_string)
    }

    pub(crate) fn passes(field: MemoryField) -> bool {
        error_of(field).is_none()
    }
}
