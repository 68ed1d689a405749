// Integration tests for async rules, timeouts and the submit pass
// Run with: cargo test -p rusty-validate --test async_rules

use std::time::Duration;

use futures::FutureExt;
use pretty_assertions::assert_eq;
use rusty_validate::{
    AsyncValidator, Engine, EngineError, FieldAdapter, FieldKind, Lang, MemoryField, MemoryFile,
    MemoryForm, LifecycleEvent, Options, PassState, RecordingRenderer, RenderEvent, Trigger, Verdict,
};

fn gallery(file: MemoryFile) -> MemoryForm {
    MemoryForm::new("gallery")
        .with_field(MemoryField::new("title", FieldKind::Text).with_rules("required").with_value("Sunset"))
        .with_field(
            MemoryField::new("photo", FieldKind::File)
                .with_rules("required, file_type, image_width")
                .with_attr("data-file-types", "image/*")
                .with_attr("data-image-max-width", "1920")
                .with_file(file),
        )
}

#[tokio::test]
async fn test_submit_runs_async_rules() {
    let engine = Engine::new();
    let renderer = RecordingRenderer::new();

    let ok = gallery(MemoryFile::image("a.jpg", "image/jpeg", 2048, 1920, 1080));
    assert!(engine.handle_submit(&ok, &renderer).await);

    let wide = gallery(MemoryFile::image("b.jpg", "image/jpeg", 2048, 4000, 3000));
    assert!(!engine.handle_submit(&wide, &renderer).await);
    assert_eq!(
        renderer.errors_for("photo"),
        vec!["Images must be at most 1920 pixels wide".to_string()]
    );
    assert_eq!(renderer.form_outcomes(), vec![true, false]);
}

#[tokio::test]
async fn test_async_fields_finish_once() {
    let engine = Engine::new();
    let renderer = RecordingRenderer::new();
    let form = gallery(MemoryFile::image("b.jpg", "image/jpeg", 2048, 4000, 3000));

    engine.validate_form_async(&form, Trigger::Submit, &renderer).await;

    let photo_lifecycle: Vec<LifecycleEvent> = renderer
        .events()
        .into_iter()
        .filter_map(|event| match event {
            RenderEvent::Lifecycle { field, event } if field == "photo" => Some(event),
            _ => None,
        })
        .filter(|event| matches!(event, LifecycleEvent::BeforeValidate | LifecycleEvent::AfterValidate { .. }))
        .collect();
    assert_eq!(
        photo_lifecycle,
        vec![LifecycleEvent::BeforeValidate, LifecycleEvent::AfterValidate { passed: false }]
    );
}

#[tokio::test]
async fn test_async_rules_wait_for_the_whole_form() {
    let engine = Engine::new();
    let form = gallery(MemoryFile::image("b.jpg", "image/jpeg", 2048, 4000, 3000));
    form.get("title").unwrap().set_value("");

    let report = engine
        .validate_form_async(&form, Trigger::Submit, &RecordingRenderer::new())
        .await;

    assert_eq!(report.get_error("title"), Some("This field is required"));
    // The photo's sync rules passed, its image rule never ran
    let photo = report.field("photo").unwrap();
    assert!(photo.passed());
    assert!(photo.outcomes.iter().all(|outcome| outcome.rule != "image_width"));
}

#[tokio::test(start_paused = true)]
async fn test_stalled_decode_times_out() {
    let options = Options {
        async_timeout_ms: Some(500),
        ..Options::default()
    };
    let engine = Engine::with_config(options, Lang::default());
    let form = gallery(MemoryFile::image("c.png", "image/png", 10, 10, 10).stalled());

    let report = engine
        .validate_field_async(&form, form.get("photo").unwrap(), Trigger::Change, &RecordingRenderer::new())
        .await;

    assert_eq!(report.state, PassState::Failed);
    assert_eq!(report.error(), Some("This value could not be confirmed"));
    assert_eq!(
        engine.take_diagnostics(),
        vec![EngineError::AsyncTimeout {
            field: "photo".to_string(),
            rule: "image_width".to_string(),
            after: Duration::from_millis(500),
        }]
    );
}

#[tokio::test]
async fn test_custom_async_rule() {
    let mut engine = Engine::new();
    assert!(engine.register_async_validator(AsyncValidator::new(
        "username_free",
        "This username is taken",
        |ctx| {
            async move {
                tokio::task::yield_now().await;
                Verdict::from_bool(ctx.value != "admin")
            }
            .boxed_local()
        },
    )));
    let form = MemoryForm::new("f").with_field(
        MemoryField::new("user", FieldKind::Text)
            .with_rules("required, username_free")
            .with_value("admin"),
    );
    let user = form.get("user").unwrap();

    // Sync passes leave async rules out
    let sync = engine.validate_field(&form, user, Trigger::Blur, &RecordingRenderer::new());
    assert!(sync.passed());

    let report = engine
        .validate_field_async(&form, user, Trigger::Blur, &RecordingRenderer::new())
        .await;
    assert_eq!(report.error(), Some("This username is taken"));

    user.set_value("ana");
    let report = engine
        .validate_field_async(&form, user, Trigger::Blur, &RecordingRenderer::new())
        .await;
    assert!(report.passed());
    assert!(engine.take_diagnostics().is_empty());
}

#[tokio::test]
async fn test_panicking_async_rule_is_unconfirmed() {
    let mut engine = Engine::new();
    engine.register_async_validator(AsyncValidator::new("flaky", "never shown", |ctx| {
        async move {
            let id: u32 = ctx.value.parse().expect("lookup failed");
            Verdict::from_bool(id > 0)
        }
        .boxed_local()
    }));
    let form = MemoryForm::new("f").with_field(MemoryField::new("x", FieldKind::Text).with_rules("flaky"));

    let report = engine
        .validate_field_async(&form, form.get("x").unwrap(), Trigger::Submit, &RecordingRenderer::new())
        .await;

    assert_eq!(report.error(), Some("This value could not be confirmed"));
    assert!(matches!(
        engine.take_diagnostics().as_slice(),
        [EngineError::RulePanicked { rule, .. }] if rule == "flaky"
    ));
}
