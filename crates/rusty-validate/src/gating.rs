//! Dependency and optionality gating
//!
//! A field can wait for another field (`data-depends-on`, optionally with
//! `data-depends-on-value`) or for itself to be filled (`data-optional`).
//! Until the gate opens the field is skipped by every pass; both kinds of
//! gate also put `required` in front of the field's rules.
//!
//! Gates are evaluated on [`Engine::attach`] and re-evaluated on
//! [`Engine::field_changed`], which hosts call from their change events.

use tracing::trace;

use crate::engine::Engine;
use crate::error::EngineError;
use crate::field::{effective_value, FieldAdapter, FormAdapter};
use crate::render::MessageRenderer;

/// What a field waits for before it is validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// Another field must be filled, and hold `value` when given
    Dependent { target: String, value: Option<String> },
    /// The field itself must be filled
    Optional,
}

impl Engine {
    /// Read every field's gate declaration and evaluate it against the
    /// form's current values
    ///
    /// A dependency on a field the form does not have is reported as
    /// [`EngineError::MissingTarget`] and the field is left ungated.
    pub fn attach(&self, form: &dyn FormAdapter) {
        let attrs = &self.options.attributes;
        for field in form.fields() {
            let depends_on = field
                .attribute(&attrs.depends_on)
                .map(|target| target.trim().to_string())
                .filter(|target| !target.is_empty());

            let gate = match depends_on {
                Some(target) if form.field(&target).is_none() => {
                    self.diagnostics.report(EngineError::MissingTarget {
                        field: field.id().to_string(),
                        attribute: attrs.depends_on.clone(),
                        target,
                    });
                    None
                }
                Some(target) => Some(Gate::Dependent {
                    target,
                    value: field
                        .attribute(&attrs.depends_on_value)
                        .map(|value| value.trim().to_string())
                        .filter(|value| !value.is_empty()),
                }),
                None if self.declares_gate(field) => Some(Gate::Optional),
                None => None,
            };

            let skip = gate
                .as_ref()
                .is_some_and(|gate| !self.gate_open(form, field, gate));
            trace!(field = field.id(), ?gate, skip, "gate attached");
            self.session.update(field.id(), |state| {
                state.gate = gate;
                state.skip = skip;
            });
        }
    }

    /// Re-evaluate the gates that depend on `changed`
    ///
    /// Fields that go back to the skipped state have their rendered
    /// validation state cleared through [`MessageRenderer::on_clear`].
    pub fn field_changed(
        &self,
        form: &dyn FormAdapter,
        changed: &dyn FieldAdapter,
        renderer: &dyn MessageRenderer,
    ) {
        for field in form.fields() {
            let Some(gate) = self.session.get(field.id()).gate else {
                continue;
            };
            let affected = match &gate {
                Gate::Optional => field.id() == changed.id(),
                Gate::Dependent { target, .. } => target == changed.name() || target == changed.id(),
            };
            if !affected {
                continue;
            }

            let skip = !self.gate_open(form, field, &gate);
            let was_skipped = self.session.update(field.id(), |state| {
                std::mem::replace(&mut state.skip, skip)
            });
            if skip && !was_skipped {
                renderer.on_clear(form, field);
            }
            if skip != was_skipped {
                trace!(field = field.id(), skip, "gate changed");
            }
        }
    }

    fn gate_open(&self, form: &dyn FormAdapter, field: &dyn FieldAdapter, gate: &Gate) -> bool {
        match gate {
            Gate::Optional => !effective_value(form, field).trim().is_empty(),
            Gate::Dependent { target, value } => {
                let Some(target) = form.field(target) else {
                    return false;
                };
                let current = effective_value(form, target);
                !current.trim().is_empty() && value.as_ref().map_or(true, |wanted| current == *wanted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::field::{FieldAdapter, FieldKind};
    use crate::memory::{MemoryField, MemoryForm};
    use crate::render::{RecordingRenderer, RenderEvent};
    use crate::rule::Trigger;
    use crate::Engine;

    fn shipping_form() -> MemoryForm {
        MemoryForm::new("order")
            .with_field(MemoryField::new("delivery", FieldKind::Select))
            .with_field(
                MemoryField::new("address", FieldKind::Text)
                    .with_attr("data-depends-on", "delivery")
                    .with_attr("data-depends-on-value", "ship"),
            )
            .with_field(
                MemoryField::new("nickname", FieldKind::Text)
                    .with_rules("letters")
                    .with_attr("data-optional", ""),
            )
    }

    #[test]
    fn test_attach_skips_unfilled_gates() {
        let form = shipping_form();
        let engine = Engine::new();
        engine.attach(&form);

        assert!(engine.is_skipped("address"));
        assert!(engine.is_skipped("nickname"));
        assert!(!engine.is_skipped("delivery"));

        let report = engine.validate_form(&form, Trigger::Submit, &RecordingRenderer::new());
        assert!(report.passed);
        assert_eq!(report.fields.len(), 1);
    }

    #[test]
    fn test_blank_dependency_value_means_any_value() {
        let form = MemoryForm::new("order")
            .with_field(MemoryField::new("coupon", FieldKind::Text))
            .with_field(
                MemoryField::new("coupon_owner", FieldKind::Text)
                    .with_attr("data-depends-on", "coupon")
                    .with_attr("data-depends-on-value", "  "),
            );
        let engine = Engine::new();
        let renderer = RecordingRenderer::new();
        engine.attach(&form);
        assert!(engine.is_skipped("coupon_owner"));

        let coupon = form.get("coupon").unwrap();
        coupon.set_value("SAVE10");
        engine.field_changed(&form, coupon, &renderer);
        assert!(!engine.is_skipped("coupon_owner"));
    }

    #[test]
    fn test_dependency_opens_on_matching_value() {
        let form = shipping_form();
        let engine = Engine::new();
        engine.attach(&form);
        let delivery = form.get("delivery").unwrap();
        let renderer = RecordingRenderer::new();

        delivery.set_value("pickup");
        engine.field_changed(&form, delivery, &renderer);
        assert!(engine.is_skipped("address"));

        delivery.set_value("ship");
        engine.field_changed(&form, delivery, &renderer);
        assert!(!engine.is_skipped("address"));

        // Now eligible, and implicitly required
        let report = engine.validate_form(&form, Trigger::Submit, &renderer);
        assert!(!report.passed);
        assert_eq!(report.get_error("address"), Some("This field is required"));

        delivery.set_value("");
        engine.field_changed(&form, delivery, &renderer);
        assert!(engine.is_skipped("address"));
        assert!(renderer.events().contains(&RenderEvent::Clear {
            field: "address".to_string()
        }));
    }

    #[test]
    fn test_optional_field_round_trip() {
        let form = shipping_form();
        let engine = Engine::new();
        engine.attach(&form);
        let nickname = form.get("nickname").unwrap();
        let renderer = RecordingRenderer::new();

        nickname.set_value("r2d2");
        engine.field_changed(&form, nickname, &renderer);
        assert!(!engine.is_skipped("nickname"));

        let report = engine.validate_field(&form, nickname, Trigger::Change, &renderer);
        assert_eq!(report.error(), Some("Only letters are allowed"));

        nickname.set_value("");
        engine.field_changed(&form, nickname, &renderer);
        assert!(engine.is_skipped("nickname"));
        assert_eq!(
            renderer
                .events()
                .iter()
                .filter(|event| matches!(event, RenderEvent::Clear { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_missing_target_leaves_field_ungated() {
        let form = MemoryForm::new("f").with_field(
            MemoryField::new("state", FieldKind::Text).with_attr("data-depends-on", "country"),
        );
        let engine = Engine::new();
        engine.attach(&form);

        assert!(!engine.is_skipped("state"));
        assert_eq!(engine.take_diagnostics().len(), 1);

        // Still required by its declaration
        let report = engine.validate_form(&form, Trigger::Submit, &RecordingRenderer::new());
        assert_eq!(report.get_error("state"), Some("This field is required"));
    }
}
