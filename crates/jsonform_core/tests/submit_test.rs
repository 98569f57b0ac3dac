use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jsonform_core::{
    handler_fn, FieldDescriptor, FormError, FormOptions, FormSideEffect, NotificationKind, Schema,
    SchemaForm, SubmissionController, SubmitFailure, SubmitHandler, SubmitPhase, REQUIRED_MESSAGE,
};
use serde_json::{json, Map, Value};

#[derive(Default)]
struct RecordingHandler {
    calls: Mutex<Vec<Map<String, Value>>>,
    failure: Option<SubmitFailure>,
}

impl RecordingHandler {
    fn failing(failure: SubmitFailure) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: Some(failure),
        }
    }

    fn calls(&self) -> Vec<Map<String, Value>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmitHandler for RecordingHandler {
    async fn submit(&self, values: Map<String, Value>) -> Result<(), SubmitFailure> {
        self.calls.lock().unwrap().push(values);
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }
}

fn signup_schema() -> Schema {
    Schema::new("Sign up")
        .with_required(["email"])
        .with_field(FieldDescriptor::new("email").with_title("Email"))
        .with_field(FieldDescriptor::new("token").with_hidden(true))
}

#[test]
fn test_controller_lifecycle() {
    let mut controller = SubmissionController::new(true);
    assert_eq!(controller.phase(), SubmitPhase::Idle);
    assert!(!controller.loading_visible());

    controller.begin().unwrap();
    assert!(controller.is_busy());
    assert!(controller.loading_visible());
    assert_eq!(controller.begin(), Err(FormError::Busy));

    let notification = controller.settle(Err(SubmitFailure::without_message()));
    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(notification.message, "提交失败");
    assert!(!controller.is_busy());
    assert!(!controller.loading_visible());
}

#[test]
fn test_loading_hidden_when_disabled() {
    let mut controller = SubmissionController::new(false);
    controller.begin().unwrap();
    assert!(controller.is_busy());
    assert!(!controller.loading_visible());
}

#[tokio::test]
async fn test_required_field_blocks_handler() {
    let handler = RecordingHandler::default();
    let mut form = SchemaForm::new(Some(signup_schema()), None, FormOptions::default());
    form.mount();

    let result = form.submit(&handler).await;

    assert_eq!(
        result,
        Err(FormError::Validation { missing: vec!["email".to_string()] })
    );
    assert!(handler.calls().is_empty());
    assert!(!form.is_busy());
    let email = form.fields().into_iter().find(|f| f.key == "email").unwrap();
    assert!(email.required);
    assert_eq!(email.error.as_deref(), Some(REQUIRED_MESSAGE));
    assert_eq!(
        form.drain_side_effects(),
        vec![FormSideEffect::ValidationFailed { missing: vec!["email".to_string()] }]
    );
}

#[tokio::test]
async fn test_hidden_fields_are_submitted() {
    let handler = RecordingHandler::default();
    let mut form = SchemaForm::new(
        Some(signup_schema()),
        Some(json!({ "token": "t-1" })),
        FormOptions::default(),
    );
    form.mount();
    form.edit("email", "ann@example.com");

    let token = form.fields().into_iter().find(|f| f.key == "token").unwrap();
    assert!(!token.visible);

    form.submit(&handler).await.unwrap();
    assert_eq!(
        handler.calls(),
        vec![json!({ "email": "ann@example.com", "token": "t-1" })
            .as_object()
            .cloned()
            .unwrap()]
    );
}

#[tokio::test]
async fn test_unset_fields_submit_as_null() {
    let handler = RecordingHandler::default();
    let schema = Schema::new("")
        .with_field(FieldDescriptor::new("nickname"))
        .with_field(FieldDescriptor::new("city"));
    let mut form = SchemaForm::new(Some(schema), None, FormOptions::default());
    form.mount();
    form.edit("city", "Oslo");

    form.submit(&handler).await.unwrap();
    assert_eq!(handler.calls()[0].get("nickname"), Some(&Value::Null));
    assert_eq!(handler.calls()[0].get("city"), Some(&json!("Oslo")));
}

#[tokio::test]
async fn test_failure_keeps_values_and_allows_retry() {
    let handler = RecordingHandler::failing(SubmitFailure::new("network down"));
    let mut form = SchemaForm::new(None, Some(json!({ "name": "Ann" })), FormOptions::default());
    form.mount();

    let notification = form.submit(&handler).await.unwrap();
    assert_eq!(notification.kind, NotificationKind::Error);
    assert!(notification.message.contains("network down"));
    assert!(!form.is_busy());
    assert!(!form.loading_visible());

    assert!(form.edit("name", "Bo"));
    form.submit(&handler).await.unwrap();
    assert_eq!(handler.calls().len(), 2);
    assert_eq!(handler.calls()[1].get("name"), Some(&json!("Bo")));
}

#[tokio::test]
async fn test_submit_while_busy_is_ignored() {
    let mut form = SchemaForm::new(None, Some(json!({ "name": "Ann" })), FormOptions::default());
    form.mount();

    let values = form.begin_submit().unwrap();
    assert_eq!(values.get("name"), Some(&json!("Ann")));
    assert!(form.loading_visible());
    assert_eq!(form.begin_submit(), Err(FormError::Busy));

    // The form stays editable while the handler is pending.
    assert!(form.edit("name", "Bo"));

    let notification = form.finish_submit(Ok(()));
    assert!(notification.is_success());
    assert!(!form.is_busy());
}

#[test]
fn test_busy_submit_skips_required_check() {
    let mut form = SchemaForm::new(Some(signup_schema()), None, FormOptions::default());
    form.mount();
    form.edit("email", "ann@example.com");
    form.begin_submit().unwrap();

    form.edit("email", "");
    form.drain_side_effects();
    assert_eq!(form.begin_submit(), Err(FormError::Busy));
    assert!(form.drain_side_effects().is_empty());
    assert!(form.is_busy());
}

#[test]
fn test_failed_required_check_leaves_form_idle() {
    let mut form = SchemaForm::new(Some(signup_schema()), None, FormOptions::default());
    form.mount();

    assert!(matches!(form.begin_submit(), Err(FormError::Validation { .. })));
    assert!(!form.is_busy());
    assert!(!form.loading_visible());

    form.edit("email", "ann@example.com");
    assert!(form.begin_submit().is_ok());
}

#[tokio::test]
async fn test_closure_handler() {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = count.clone();
    let handler = handler_fn(move |values: Map<String, Value>| {
        let seen = seen.clone();
        async move {
            seen.fetch_add(values.len(), Ordering::SeqCst);
            Err(SubmitFailure::from("rejected"))
        }
    });

    let mut form = SchemaForm::new(None, Some(json!({ "a": 1, "b": 2 })), FormOptions::default());
    form.mount();
    let notification = form.submit(&handler).await.unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 2);
    assert_eq!(notification.message, "提交失败：rejected");
}

#[test]
fn test_edit_revalidates_required_field() {
    let mut form = SchemaForm::new(Some(signup_schema()), None, FormOptions::default());
    form.mount();
    assert!(form.begin_submit().is_err());

    form.edit("email", "a@b.c");
    assert_eq!(form.state().error("email"), None);

    form.edit("email", "");
    assert_eq!(form.state().error("email"), Some(REQUIRED_MESSAGE));

    assert!(!form.edit("unknown", "x"));
}
