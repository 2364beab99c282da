use jshift::{shift, ShiftConfig, ShiftError, Shifter, Spec};
use serde_json::{json, Value};

fn config_from(text: &str) -> ShiftConfig {
    ShiftConfig::from_json_str(text).unwrap()
}

fn run(config: &ShiftConfig, input: Value) -> Result<Value, ShiftError> {
    Shifter::new(config).shift_value(&input)
}

#[test]
fn test_no_wildcard_copy() {
    let config = config_from(r#"{"spec": {"newName": "oldName"}}"#);
    assert_eq!(run(&config, json!({"oldName": 1})).unwrap(), json!({"newName": 1}));
}

#[test]
fn test_whole_document_copy() {
    let config = config_from(r#"{"spec": {"wrapped": "$"}}"#);
    assert_eq!(
        run(&config, json!({"a": 1})).unwrap(),
        json!({"wrapped": {"a": 1}})
    );
}

#[test]
fn test_singleton_list_wraps_as_array() {
    let config = config_from(r#"{"spec": {"x": ["a.b"]}}"#);
    assert_eq!(run(&config, json!({"a": {"b": 5}})).unwrap(), json!({"x": [5]}));
}

#[test]
fn test_wildcard_fan_out_follows_source_length() {
    let config = config_from(r#"{"spec": {"items[*].id": "records[*].key"}}"#);
    let output = run(
        &config,
        json!({"records": [{"key": "r1"}, {"key": "r2"}], "items": [1, 2, 3, 4, 5]}),
    )
    .unwrap();
    assert_eq!(output, json!({"items": [{"id": "r1"}, {"id": "r2"}]}));
}

#[test]
fn test_required_but_missing_fails() {
    let config = config_from(r#"{"spec": {"x": "missing.path"}, "require": true}"#);
    let err = run(&config, json!({})).unwrap_err();
    assert!(matches!(err, ShiftError::NotFound { ref path } if path == "missing.path"));
}

#[test]
fn test_not_required_missing_writes_null() {
    let config = config_from(r#"{"spec": {"x": "missing.path"}}"#);
    assert_eq!(run(&config, json!({})).unwrap(), json!({"x": null}));
}

#[test]
fn test_last_write_wins_across_entries() {
    let config = ShiftConfig::new(
        Spec::new()
            .with_entry("out", "first")
            .with_entry("out", "second"),
    );
    let output = run(&config, json!({"first": 1, "second": 2})).unwrap();
    assert_eq!(output, json!({"out": 2}));
}

#[test]
fn test_duplicate_destinations_in_config_text_apply_in_order() {
    let text = r#"{"spec": {"out": "first", "out[*]": "b[*]", "out": "second"}}"#;
    let input = json!({"b": [7], "first": 1, "second": 2});

    let from_text = config_from(text);
    let derived: ShiftConfig = serde_json::from_str(text).unwrap();
    assert_eq!(from_text.spec.len(), 3);
    assert_eq!(run(&from_text, input.clone()).unwrap(), json!({"out": 2}));
    assert_eq!(run(&derived, input).unwrap(), json!({"out": 2}));
}

#[test]
fn test_last_write_wins_across_wildcard_iterations() {
    let config = ShiftConfig::new(
        Spec::new()
            .with_entry("rows[*]", "a[*]")
            .with_entry("rows[*]", "b[*]"),
    );
    let output = run(&config, json!({"a": [1, 2, 3], "b": [9]})).unwrap();
    assert_eq!(output, json!({"rows": [9, 2, 3]}));
}

#[test]
fn test_later_entry_replaces_nested_object_without_merging() {
    let config = config_from(r#"{"spec": {"user": "profile", "user.extra": "flag"}}"#);
    let output = run(&config, json!({"profile": {"name": "Ann"}, "flag": true})).unwrap();
    assert_eq!(output, json!({"user": {"name": "Ann", "extra": true}}));

    let config = config_from(r#"{"spec": {"user.extra": "flag", "user": "profile"}}"#);
    let output = run(&config, json!({"profile": {"name": "Ann"}, "flag": true})).unwrap();
    assert_eq!(output, json!({"user": {"name": "Ann"}}));
}

#[test]
fn test_in_place_preserves_untouched_fields() {
    let config = config_from(r#"{"spec": {"meta.copied": "id"}, "inPlace": true}"#);
    let input = json!({"id": 7, "name": "keep me", "meta": {"v": 1}});
    let output = run(&config, input).unwrap();
    assert_eq!(
        output,
        json!({"id": 7, "name": "keep me", "meta": {"v": 1, "copied": 7}})
    );
}

#[test]
fn test_nested_wildcards() {
    let config = config_from(
        r#"{"spec": {"orders[*].lines[*].sku": "data.orders[*].items[*].product.sku"}}"#,
    );
    let input = json!({
        "data": {
            "orders": [
                {"items": [{"product": {"sku": "A"}}, {"product": {"sku": "B"}}]},
                {"items": [{"product": {"sku": "C"}}]}
            ]
        }
    });
    assert_eq!(
        run(&config, input).unwrap(),
        json!({
            "orders": [
                {"lines": [{"sku": "A"}, {"sku": "B"}]},
                {"lines": [{"sku": "C"}]}
            ]
        })
    );
}

#[test]
fn test_entries_apply_in_declared_order() {
    let config = config_from(r#"{"spec": {"z": "a", "y": "b", "x": "c"}}"#);
    let output = run(&config, json!({"a": 1, "b": 2, "c": 3})).unwrap();
    let keys: Vec<&String> = output.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["z", "y", "x"]);
}

#[test]
fn test_bad_spec_value_is_spec_error() {
    let err = ShiftConfig::from_json_str(r#"{"spec": {"x": ["a", 2]}}"#).unwrap_err();
    assert!(matches!(err, ShiftError::Spec { ref key, .. } if key == "x"));
}

#[test]
fn test_input_is_not_mutated() {
    let config = config_from(r#"{"spec": {"a": "b"}, "inPlace": true}"#);
    let input = json!({"b": 1});
    let output = Shifter::new(&config).shift_value(&input).unwrap();
    assert_eq!(input, json!({"b": 1}));
    assert_eq!(output, json!({"a": 1, "b": 1}));
}

#[test]
fn test_byte_interface() {
    let config = config_from(r#"{"spec": {"ids": ["records[*].id"]}}"#);
    let output = shift(&config, br#"{"records": [{"id": 1}, {"id": 2}]}"#).unwrap();
    let output: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(output, json!({"ids": [[1, 2]]}));
}

#[test]
fn test_independent_shifts_across_threads() {
    let config = config_from(r#"{"spec": {"out[*]": "in[*].v"}}"#);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let config = &config;
                scope.spawn(move || {
                    let input = json!({"in": [{"v": n}, {"v": n + 1}]});
                    Shifter::new(config).shift_value(&input).unwrap()
                })
            })
            .collect();

        for (n, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), json!({"out": [n, n + 1]}));
        }
    });
}

#[test]
fn test_wildcard_list_keeps_positions_for_missing_leaves() {
    let input = json!({"records": [{"key": "r1"}, {}, {"key": "r3"}]});

    let config = config_from(r#"{"spec": {"keys": "records[*].key"}}"#);
    assert_eq!(
        run(&config, input.clone()).unwrap(),
        json!({"keys": ["r1", null, "r3"]})
    );

    let config = config.with_require(true);
    let err = run(&config, input).unwrap_err();
    assert!(matches!(err, ShiftError::NotFound { ref path } if path == "records[1].key"));
}

#[test]
fn test_wildcard_list_over_object_is_missing() {
    let config = config_from(r#"{"spec": {"keys": "records[*].key"}}"#);
    let input = json!({"records": {"a": {"key": "r1"}}});
    assert_eq!(run(&config, input).unwrap(), json!({"keys": null}));
}

#[test]
fn test_destination_index_overflow_is_invalid_path() {
    let config = config_from(r#"{"spec": {"x[18446744073709551615]": "a"}}"#);
    let err = run(&config, json!({"a": 1})).unwrap_err();
    assert!(matches!(err, ShiftError::InvalidPath { .. }), "{:?}", err);
}

#[test]
fn test_destination_index_far_past_the_end_is_invalid_path() {
    let config = config_from(r#"{"spec": {"x[4000000000]": "a"}}"#);
    let err = run(&config, json!({"a": 1})).unwrap_err();
    assert!(matches!(err, ShiftError::InvalidPath { .. }), "{:?}", err);
}

#[test]
fn test_source_key_with_control_character() {
    let config = ShiftConfig::new(Spec::new().with_entry("out", "a\tb"));
    assert_eq!(
        run(&config, json!({"a\tb": 1})).unwrap(),
        json!({"out": 1})
    );
}
