//! Argument-builder tests: per-type coercion and the silent-skip rules.
mod common;
use ahash::AHashMap;
use common::{date_only_schema, json_schema_option, text_option, typed_option};
use kataform::prelude::*;
use serde_json::json;

fn raw(entries: &[(&str, FormValue)]) -> AHashMap<String, FormValue> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn empty_arrays_are_omitted() {
    // The form engine accepts an empty array for a required array field; this
    // layer drops it anyway. The two layers diverge on purpose.
    let options = vec![text_option("tags")];
    let values = raw(&[("tags", FormValue::Array(vec![]))]);
    let args = build_args(&options, &values, &AHashMap::new());
    assert!(!args.contains_key("tags"));
}

#[test]
fn null_and_empty_string_are_omitted() {
    let options = vec![text_option("a"), text_option("b"), text_option("c")];
    let values = raw(&[
        ("a", FormValue::Null),
        ("b", FormValue::Text(String::new())),
        ("c", FormValue::Text("kept".into())),
    ]);
    let args = build_args(&options, &values, &AHashMap::new());
    assert_eq!(args.len(), 1);
    assert_eq!(args["c"], json!("kept"));
}

#[test]
fn dates_coerce_to_wire_strings() {
    let options = vec![typed_option("since", OptionType::Date)];
    let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    let values = raw(&[("since", FormValue::Date(date))]);
    let args = build_args(&options, &values, &AHashMap::new());
    assert_eq!(args["since"], json!("2024-03-05"));
}

#[test]
fn already_wire_shaped_dates_pass_through() {
    let options = vec![typed_option("since", OptionType::Date)];
    let values = raw(&[("since", FormValue::Text("2024-03-05".into()))]);
    let args = build_args(&options, &values, &AHashMap::new());
    assert_eq!(args["since"], json!("2024-03-05"));
}

#[test]
fn json_schema_subvalue_wins_over_stale_raw_entry() {
    let options = vec![json_schema_option(date_only_schema())];
    let values = raw(&[("json", FormValue::Text("stale".into()))]);
    let mut sub = AHashMap::new();
    sub.insert("json".to_string(), json!({ "a": 1 }));

    let args = build_args(&options, &values, &sub);
    assert_eq!(args["json"], json!({ "a": 1 }));
}

#[test]
fn json_schema_option_without_subvalue_is_omitted() {
    let options = vec![json_schema_option(date_only_schema())];
    let values = raw(&[("json", FormValue::Text("stale".into()))]);
    let args = build_args(&options, &values, &AHashMap::new());
    assert!(args.is_empty());
}

#[test]
fn credential_and_file_values_pass_through() {
    let options = vec![
        typed_option("db", OptionType::Credential),
        typed_option("upload", OptionType::File),
    ];
    let values = raw(&[
        ("db", FormValue::Number(7.0)),
        ("upload", FormValue::Text("/uploads/abc.csv".into())),
    ]);
    let args = build_args(&options, &values, &AHashMap::new());
    assert_eq!(args["db"], json!(7));
    assert_eq!(args["upload"], json!("/uploads/abc.csv"));
}

#[test]
fn declaration_order_is_preserved() {
    let options = vec![text_option("z"), text_option("a"), text_option("m")];
    let values = raw(&[
        ("z", FormValue::Text("1".into())),
        ("a", FormValue::Text("2".into())),
        ("m", FormValue::Text("3".into())),
    ]);
    let args = build_args(&options, &values, &AHashMap::new());
    let keys: Vec<_> = args.keys().cloned().collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn build_args_never_fails_on_missing_required_values() {
    // Required-ness is the presenting form's concern; this layer only shapes.
    let mut option = text_option("must_have");
    option.required = true;
    let args = build_args(&[option], &AHashMap::new(), &AHashMap::new());
    assert!(args.is_empty());
}
