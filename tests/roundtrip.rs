use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use l10n_editor::{Entry, ExportOptions, flatten, parse_and_flatten, unflatten, unflatten_with};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Replaces every scalar leaf with its string form, the shape `unflatten` emits.
fn stringified(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), stringified(v)))
                .collect(),
        ),
        Value::Array(values) => Value::Array(values.iter().map(stringified).collect()),
        Value::String(s) => Value::String(s.clone()),
        Value::Number(n) => Value::String(n.to_string()),
        Value::Bool(b) => Value::String(b.to_string()),
        Value::Null => Value::String("null".to_string()),
    }
}

#[test]
fn nested_objects_round_trip_with_string_leaves() -> Result<()> {
    let input = r#"{
  "common": {
    "save": "Save",
    "cancel": "Cancel",
    "count": 3
  },
  "userProfile": {
    "title": "Profile",
    "fields": {
      "first_name": "First name",
      "visible": true
    }
  },
  "footer": "bye"
}"#;

    let original: Value = serde_json::from_str(input)?;
    let items = parse_and_flatten(input)?;
    let back = unflatten(items.as_slice())?;

    assert_eq!(back, stringified(&original));
    assert_eq!(
        serde_json::to_string(&back)?,
        serde_json::to_string(&stringified(&original))?,
        "key order survives the round trip"
    );
    Ok(())
}

#[test]
fn flatten_order_is_preorder() -> Result<()> {
    let items = parse_and_flatten(r#"{"b": {"y": 1, "x": {"q": 2}}, "a": 3}"#)?;
    let keys: Vec<&str> = items.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["b.y", "b.x.q", "a"]);
    Ok(())
}

#[test]
fn arrays_stay_index_keyed_unless_restoring() -> Result<()> {
    let v = json!({"days": ["Mon", "Tue"], "nested": [{"a": 1}, {"a": 2}]});
    let items = flatten(&v);

    assert_eq!(
        unflatten(items.as_slice())?,
        json!({
            "days": {"0": "Mon", "1": "Tue"},
            "nested": {"0": {"a": "1"}, "1": {"a": "2"}}
        })
    );

    let restored = unflatten_with(
        items.as_slice(),
        ExportOptions {
            restore_arrays: true,
        },
    )?;
    assert_eq!(restored, stringified(&v));
    Ok(())
}

#[test]
fn plural_tables_keyed_by_number_round_trip() -> Result<()> {
    let input = r#"{"plural": {"0": "none", "1": "one", "2": "many"}, "0": "zero"}"#;
    let original: Value = serde_json::from_str(input)?;
    let back = unflatten(parse_and_flatten(input)?.as_slice())?;
    assert_eq!(back, original);
    assert!(back.is_object());
    Ok(())
}

#[test]
fn conflicting_keys_are_reported_not_dropped() {
    let entries = [Entry::new("a", "x"), Entry::new("a.b", "y")];
    let err = unflatten(&entries).unwrap_err();
    assert!(
        err.to_string().contains("`a.b`") && err.to_string().contains("`a`"),
        "unexpected message: {err}"
    );
}
