//! Identity document and payment card rules

use rusty_validate_core::{
    check_credit_card, check_cvv, is_ec_cedula, is_ec_ruc, split_list, CardBrand, CardCheck,
};

use crate::field::effective_value;
use crate::rule::{RuleContext, Validator, Verdict};

pub(super) fn validators() -> Vec<Validator> {
    vec![
        Validator::new("ec_cedula", "Please enter a valid cedula", |ctx| {
            Verdict::from_bool(is_ec_cedula(ctx.value))
        }),
        Validator::new("ec_ruc", "Please enter a valid RUC", |ctx| {
            Verdict::from_bool(is_ec_ruc(ctx.value))
        }),
        Validator::new("credit_card", "Please enter a valid card number", credit_card),
        Validator::new("cvv", "Please enter a valid security code", cvv),
    ]
}

/// Records the detected brand for the field so `cvv` can size its check
fn credit_card(ctx: &RuleContext<'_>) -> Verdict {
    let allowed: Vec<CardBrand> = ctx
        .attr(&ctx.options.attributes.credit_card_brands)
        .map(|list| split_list(&list))
        .unwrap_or_default()
        .iter()
        .filter_map(|name| CardBrand::from_name(name))
        .collect();

    let check = check_credit_card(ctx.value, &allowed);
    ctx.session.set_card_brand(ctx.field.id(), check.brand());

    match check {
        CardCheck::Valid(_) => Verdict::Pass,
        CardCheck::UnknownBrand => ctx.fail_with("credit_card_brand", &[]),
        CardCheck::Invalid(_) | CardCheck::Malformed => Verdict::Fail,
    }
}

fn cvv(ctx: &RuleContext<'_>) -> Verdict {
    let attribute = &ctx.options.attributes.cvv_target;
    let brand = match ctx.attr(attribute) {
        None => None,
        Some(_) => {
            let Some(card) = ctx.target(attribute) else {
                return Verdict::Unconfirmed;
            };
            // A card field that has not been validated yet still names its brand
            ctx.session
                .card_brand(card.id())
                .or_else(|| check_credit_card(&effective_value(ctx.form, card), &[]).brand())
        }
    };
    Verdict::from_bool(check_cvv(ctx.value, brand))
}

#[cfg(test)]
mod tests {
    use super::super::testing::{error_of, passes, run};
    use crate::error::EngineError;
    use crate::field::{FieldAdapter, FieldKind};
    use crate::memory::{MemoryField, MemoryForm};
    use crate::render::NoopRenderer;
    use crate::rule::Trigger;
    use crate::Engine;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use rusty_validate_core::CardBrand;

    fn input(rule: &str, value: &str) -> MemoryField {
        MemoryField::new("doc", FieldKind::Text).with_rules(rule).with_value(value)
    }

    #[rstest]
    #[case("ec_cedula", "1710034065", true)]
    #[case("ec_cedula", "1712345678", false)]
    #[case("ec_cedula", "2510034065", false)]
    #[case("ec_ruc", "1710034065001", true)]
    #[case("ec_ruc", "1790016919001", true)]
    #[case("ec_ruc", "1710034065000", false)]
    fn test_ecuadorian_ids(#[case] rule: &str, #[case] value: &str, #[case] valid: bool) {
        assert_eq!(passes(input(rule, value)), valid);
    }

    #[rstest]
    #[case("4111 1111 1111 1111", None)]
    #[case("3782-822463-10005", None)]
    #[case("4111111111111112", Some("Please enter a valid card number"))]
    #[case("9111111111111111", Some("This card type is not accepted"))]
    #[case("4111x1111", Some("Please enter a valid card number"))]
    fn test_credit_card(#[case] value: &str, #[case] expected: Option<&str>) {
        assert_eq!(error_of(input("credit_card", value)), expected.map(str::to_string));
    }

    #[test]
    fn test_credit_card_brand_filter() {
        let field = input("credit_card", "5555555555554444").with_attr("data-credit-card-brands", "visa, amex");
        assert_eq!(error_of(field), Some("This card type is not accepted".to_string()));
    }

    fn checkout(card: &str, code: &str) -> MemoryForm {
        MemoryForm::new("pay")
            .with_field(input("credit_card", card).with_id("card"))
            .with_field(
                MemoryField::new("code", FieldKind::Text)
                    .with_rules("cvv")
                    .with_value(code)
                    .with_attr("data-cvv-target", "card"),
            )
    }

    #[test]
    fn test_cvv_follows_detected_brand() {
        let engine = Engine::new();
        let form = checkout("378282246310005", "123");

        let card = engine.validate_field(&form, form.get("card").unwrap(), Trigger::Blur, &NoopRenderer);
        assert!(card.passed());
        assert_eq!(engine.card_brand("card"), Some(CardBrand::Amex));

        let code = form.get("code").unwrap();
        assert!(!engine.validate_field(&form, code, Trigger::Blur, &NoopRenderer).passed());
        code.set_value("1234");
        assert!(engine.validate_field(&form, code, Trigger::Blur, &NoopRenderer).passed());
    }

    #[test]
    fn test_cvv_before_card_validation_reads_card_value() {
        let form = checkout("4111111111111111", "1234");
        assert_eq!(run(&form, "code").error(), Some("Please enter a valid security code"));
    }

    #[test]
    fn test_cvv_without_target_accepts_three_or_four_digits() {
        assert!(passes(input("cvv", "123")));
        assert!(passes(input("cvv", "1234")));
        assert!(!passes(input("cvv", "12")));
    }

    #[test]
    fn test_cvv_missing_target_is_unconfirmed() {
        let engine = Engine::new();
        let form = MemoryForm::new("pay").with_field(input("cvv", "123").with_attr("data-cvv-target", "nowhere"));

        let report = engine.validate_field(&form, form.get("doc").unwrap(), Trigger::Blur, &NoopRenderer);
        assert_eq!(report.error(), Some("This value could not be confirmed"));
        assert!(matches!(
            engine.take_diagnostics().as_slice(),
            [EngineError::MissingTarget { target, .. }] if target == "nowhere"
        ));
    }
}
