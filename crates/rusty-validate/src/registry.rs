// File: src/registry.rs
// Purpose: Name-keyed rule registries

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::builtins;
use crate::error::{EngineError, RuleKind};
use crate::rule::{AsyncValidator, Modifier, RuleDefinition, Validator};

/// Built-in rules, shared by every registry created with [`RuleRegistry::builtin`]
static BUILTIN: Lazy<RuleRegistry> = Lazy::new(|| {
    let mut registry = RuleRegistry::new();
    builtins::install(&mut registry);
    registry
});

/// Validators, async validators and modifiers by name
///
/// The three maps are independent: a validator and a modifier may share a
/// name. Within one map a name is taken once; a second registration is
/// rejected and the first definition stays.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    validators: HashMap<String, Validator>,
    async_validators: HashMap<String, AsyncValidator>,
    modifiers: HashMap<String, Modifier>,
}

fn insert<F>(
    map: &mut HashMap<String, RuleDefinition<F>>,
    kind: RuleKind,
    rule: RuleDefinition<F>,
) -> Result<(), EngineError> {
    if map.contains_key(&rule.name) {
        return Err(EngineError::DuplicateRule {
            kind,
            name: rule.name,
        });
    }
    tracing::trace!(%kind, name = %rule.name, "rule registered");
    map.insert(rule.name.clone(), rule);
    Ok(())
}

impl RuleRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh copy of the built-in rule set
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    pub fn register_validator(&mut self, rule: Validator) -> Result<(), EngineError> {
        insert(&mut self.validators, RuleKind::Validator, rule)
    }

    pub fn register_async_validator(&mut self, rule: AsyncValidator) -> Result<(), EngineError> {
        insert(&mut self.async_validators, RuleKind::AsyncValidator, rule)
    }

    pub fn register_modifier(&mut self, rule: Modifier) -> Result<(), EngineError> {
        insert(&mut self.modifiers, RuleKind::Modifier, rule)
    }

    pub fn validator(&self, name: &str) -> Option<&Validator> {
        self.validators.get(name)
    }

    pub fn async_validator(&self, name: &str) -> Option<&AsyncValidator> {
        self.async_validators.get(name)
    }

    pub fn modifier(&self, name: &str) -> Option<&Modifier> {
        self.modifiers.get(name)
    }

    /// Registered names of one kind, sorted
    pub fn names(&self, kind: RuleKind) -> Vec<&str> {
        let mut names: Vec<&str> = match kind {
            RuleKind::Validator => self.validators.keys().map(String::as_str).collect(),
            RuleKind::AsyncValidator => self.async_validators.keys().map(String::as_str).collect(),
            RuleKind::Modifier => self.modifiers.keys().map(String::as_str).collect(),
        };
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Verdict;

    #[test]
    fn test_duplicate_is_rejected() {
        let mut registry = RuleRegistry::new();
        registry
            .register_validator(Validator::new("even", "first", |_| Verdict::Pass))
            .unwrap();

        let err = registry
            .register_validator(Validator::new("even", "second", |_| Verdict::Fail))
            .unwrap_err();

        assert_eq!(
            err,
            EngineError::DuplicateRule {
                kind: RuleKind::Validator,
                name: "even".to_string()
            }
        );
        assert_eq!(registry.validator("even").unwrap().invalid_message, "first");
    }

    #[test]
    fn test_maps_are_independent() {
        let mut registry = RuleRegistry::new();
        registry
            .register_validator(Validator::new("trim", "", |_| Verdict::Pass))
            .unwrap();
        registry
            .register_modifier(Modifier::new("trim", |ctx| ctx.value.trim().to_string()))
            .unwrap();

        assert!(registry.validator("trim").is_some());
        assert!(registry.modifier("trim").is_some());
        assert!(registry.async_validator("trim").is_none());
    }

    #[test]
    fn test_builtin_set() {
        let registry = RuleRegistry::builtin();
        let validators = registry.names(RuleKind::Validator);
        assert_eq!(validators.len(), 24);
        assert!(validators.contains(&"ec_cedula"));
        assert_eq!(
            registry.names(RuleKind::AsyncValidator),
            vec!["image_dimension", "image_height", "image_width"]
        );
        assert_eq!(registry.names(RuleKind::Modifier).len(), 10);
    }

    #[test]
    fn test_builtin_copies_are_independent() {
        let mut first = RuleRegistry::builtin();
        first
            .register_validator(Validator::new("custom", "", |_| Verdict::Pass))
            .unwrap();

        let second = RuleRegistry::builtin();
        assert!(first.validator("custom").is_some());
        assert!(second.validator("custom").is_none());
    }
}
