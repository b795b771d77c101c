//! End-to-end tests: workflow round-trips, fail-fast submission, concurrent
//! sub-form validation and argument collection.
mod common;
use ahash::AHashMap;
use common::{date_only_schema, json_schema_option, sample_workflow, text_option};
use kataform::error::CodecError;
use kataform::prelude::*;
use kataform::workflow::codec::{decode_json_field, encode_json_field};
use serde_json::json;

#[test]
fn workflow_round_trips_through_the_editing_shape() {
    let workflow = sample_workflow();
    let edit = WorkflowEdit::from_wire(&workflow);

    // Boundary fields really are JSON strings while editing.
    assert!(edit.steps[1].extension.contains("SELECT 1"));
    assert!(edit.notifications[0].extensions.contains("hooks.example"));
    assert!(edit.options[1]
        .json_schema_text
        .as_deref()
        .unwrap()
        .contains("\"start\""));

    let back = edit.into_wire().unwrap();
    assert_eq!(back, workflow);
}

#[test]
fn boundary_codec_is_a_single_stable_pair() {
    let value = json!({ "sql": "SELECT 1", "credential_id": 3 });
    let encoded = encode_json_field(&value);
    assert_eq!(decode_json_field(&encoded).unwrap(), value);
    // Canonical form is compact: re-encoding a decoded string is stable.
    assert_eq!(encode_json_field(&decode_json_field(&encoded).unwrap()), encoded);
}

#[test]
fn submission_fails_fast_on_the_first_bad_step() {
    let mut edit = WorkflowEdit::from_wire(&sample_workflow());
    edit.steps[1].extension = json!({ "sql": "", "credential_id": 3 }).to_string();

    let err = edit.into_wire().unwrap_err();
    let CodecError::Step(step_err) = err else {
        panic!("expected a step error");
    };
    assert_eq!(step_err.order, 2);
    assert!(step_err.to_string().contains("Step 2"));
}

#[test]
fn bad_notification_extensions_abort_submission() {
    let mut edit = WorkflowEdit::from_wire(&sample_workflow());
    edit.notifications[0].extensions = "[1, 2]".to_string();
    let err = edit.into_wire().unwrap_err();
    assert!(matches!(err, CodecError::BadNotification { index: 0 }));
}

#[test]
fn validate_all_is_all_or_nothing() {
    let mut good = FormEngine::new(&date_only_schema()).unwrap();
    good.set_value(&json!({ "start": "2024-03-05" }));

    let bad = FormEngine::new(&date_only_schema()).unwrap();
    // Never filled in: the required date is missing.

    let outcome = tokio_test::block_on(validate_all(&[("json", &good), ("extra", &bad)]));
    let errors = outcome.unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, "extra.start");
    assert_eq!(errors[0].kind, FieldErrorKind::Required);
}

#[tokio::test]
async fn validate_all_collects_every_subvalue_on_success() {
    let mut first = FormEngine::new(&date_only_schema()).unwrap();
    first.set_value(&json!({ "start": "2024-03-05" }));
    let mut second = FormEngine::new(&date_only_schema()).unwrap();
    second.set_value(&json!({ "start": "2025-01-01" }));

    let values = validate_all(&[("a", &first), ("b", &second)]).await.unwrap();
    assert_eq!(values["a"], json!({ "start": "2024-03-05" }));
    assert_eq!(values["b"], json!({ "start": "2025-01-01" }));
}

#[tokio::test]
async fn collect_args_merges_subform_output_last() {
    let options = vec![
        text_option("env"),
        json_schema_option(date_only_schema()),
    ];

    let mut raw = AHashMap::new();
    raw.insert("env".to_string(), FormValue::Text("prod".into()));
    raw.insert("json".to_string(), FormValue::Text("stale".into()));

    let mut form = FormEngine::new(&date_only_schema()).unwrap();
    form.set_value(&json!({ "start": "2024-03-05" }));

    let args = collect_args(&options, &raw, &[("json", &form)]).await.unwrap();
    assert_eq!(args["env"], json!("prod"));
    assert_eq!(args["json"], json!({ "start": "2024-03-05" }));
}

#[tokio::test]
async fn collect_args_propagates_subform_failures() {
    let options = vec![json_schema_option(date_only_schema())];
    let form = FormEngine::new(&date_only_schema()).unwrap();

    let errors = collect_args(&options, &AHashMap::new(), &[("json", &form)])
        .await
        .unwrap_err();
    assert_eq!(errors[0].path, "json.start");
}

#[test]
fn run_request_serializes_args_in_order() {
    let mut args = indexmap::IndexMap::new();
    args.insert("env".to_string(), json!("prod"));
    args.insert("json".to_string(), json!({ "start": "2024-03-05" }));
    let request = RunRequest { job_id: 42, args };

    let body = serde_json::to_value(&request).unwrap();
    assert_eq!(body["job_id"], json!(42));
    assert_eq!(body["args"]["env"], json!("prod"));
}
