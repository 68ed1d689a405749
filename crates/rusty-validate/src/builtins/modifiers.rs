//! Value modifiers

use rusty_validate_core::{format_currency, modifiers as text, unformat_currency};

use crate::rule::{Modifier, RuleContext, Trigger};

pub(super) fn modifiers() -> Vec<Modifier> {
    vec![
        Modifier::new("lowercase", |ctx| text::lowercase(ctx.value)).on_input(),
        Modifier::new("uppercase", |ctx| text::uppercase(ctx.value)).on_input(),
        Modifier::new("capitalize", |ctx| text::capitalize(ctx.value)),
        Modifier::new("capitalize_words", |ctx| text::capitalize_words(ctx.value)),
        Modifier::new("pascal_case", |ctx| text::pascal_case(ctx.value)),
        Modifier::new("camel_case", |ctx| text::camel_case(ctx.value)),
        Modifier::new("trim", |ctx| text::trim(ctx.value)),
        Modifier::new("trim_start", |ctx| text::trim_start(ctx.value)),
        Modifier::new("trim_end", |ctx| text::trim_end(ctx.value)),
        Modifier::new("currency", currency),
    ]
}

/// Formats the amount for display and keeps the plain number in the session
///
/// On focus the plain number comes back so it can be edited.
fn currency(ctx: &RuleContext<'_>) -> String {
    let id = ctx.field.id();
    if ctx.trigger == Trigger::Focus {
        return ctx
            .session
            .original_value(id)
            .unwrap_or_else(|| ctx.value.to_string());
    }

    let format = &ctx.options.currency;
    let Some(plain) = unformat_currency(ctx.value, format) else {
        return ctx.value.to_string();
    };
    let Ok(number) = plain.parse::<f64>() else {
        return ctx.value.to_string();
    };
    ctx.session.set_original_value(id, Some(plain));
    format_currency(number, format)
}

#[cfg(test)]
mod tests {
    use crate::config::Options;
    use crate::field::{FieldAdapter, FieldKind};
    use crate::lang::Lang;
    use crate::memory::{MemoryField, MemoryForm};
    use crate::rule::Trigger;
    use crate::Engine;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use rusty_validate_core::CurrencyFormat;

    fn modify(list: &str, value: &str, trigger: Trigger) -> String {
        let form = MemoryForm::new("f").with_field(
            MemoryField::new("v", FieldKind::Text)
                .with_value(value)
                .with_attr("data-modifiers", list),
        );
        Engine::new().apply_modifiers(&form, form.get("v").unwrap(), trigger)
    }

    #[rstest]
    #[case("lowercase", "MiXeD", "mixed")]
    #[case("uppercase", "MiXeD", "MIXED")]
    #[case("capitalize", "hELLO world", "Hello world")]
    #[case("capitalize_words", "hELLO wORLD", "Hello World")]
    #[case("pascal_case", "user first name", "UserFirstName")]
    #[case("camel_case", "user first name", "userFirstName")]
    #[case("trim", "  x  ", "x")]
    #[case("trim_start", "  x  ", "x  ")]
    #[case("trim_end", "  x  ", "  x")]
    #[case("trim, uppercase", "  ab ", "AB")]
    fn test_modifiers(#[case] list: &str, #[case] value: &str, #[case] expected: &str) {
        assert_eq!(modify(list, value, Trigger::Blur), expected);
    }

    #[test]
    fn test_case_modifiers_run_while_typing() {
        assert_eq!(modify("uppercase, trim", " ab ", Trigger::Input), " AB ");
    }

    #[test]
    fn test_currency_round_trip() {
        let engine = Engine::new();
        let form = MemoryForm::new("f").with_field(
            MemoryField::new("price", FieldKind::Text)
                .with_value("1234.5")
                .with_attr("data-modifiers", "currency"),
        );
        let price = form.get("price").unwrap();

        assert_eq!(engine.apply_modifiers(&form, price, Trigger::Blur), "$1,234.50");
        assert_eq!(engine.original_value("price"), Some("1234.5".to_string()));

        assert_eq!(engine.apply_modifiers(&form, price, Trigger::Focus), "1234.5");
        assert_eq!(price.value(), "1234.5");

        price.set_value("99");
        assert_eq!(engine.apply_modifiers(&form, price, Trigger::Change), "$99.00");
    }

    #[test]
    fn test_currency_uses_configured_format() {
        let options = Options {
            currency: CurrencyFormat {
                symbol: "€".to_string(),
                decimals: 2,
                thousands_separator: ".".to_string(),
                decimal_separator: ",".to_string(),
                symbol_after: true,
            },
            ..Options::default()
        };
        let engine = Engine::with_config(options, Lang::default());
        let form = MemoryForm::new("f").with_field(
            MemoryField::new("price", FieldKind::Text)
                .with_value("1.234,5 €")
                .with_attr("data-modifiers", "currency"),
        );

        assert_eq!(
            engine.apply_modifiers(&form, form.get("price").unwrap(), Trigger::Blur),
            "1.234,50 €"
        );
    }

    #[test]
    fn test_currency_leaves_non_numbers() {
        assert_eq!(modify("currency", "n/a", Trigger::Blur), "n/a");
    }
}
