//! Subset equality for literal `json` expectations

use serde_json::Value;

/// Check `actual` against a literal `expected` value.
///
/// Objects are compared as subsets: every key of `expected` must be present in
/// `actual` with a matching value, extra keys in `actual` are ignored and an
/// empty expected object matches anything. `null` expects nothing. Scalars and
/// arrays must be equal (see [`json_equal`]).
#[must_use]
pub fn matches_value(actual: &Value, expected: &Value) -> bool {
    match expected {
        Value::Null => true,
        Value::Object(expected_map) if expected_map.is_empty() => true,
        Value::Object(expected_map) => {
            let Value::Object(actual_map) = actual else {
                return false;
            };
            expected_map.iter().all(|(key, exp)| {
                actual_map
                    .get(key)
                    .is_some_and(|act| matches_value(act, exp))
            })
        }
        _ => json_equal(actual, expected),
    }
}

/// Deep equality where numbers compare by value, so `1 == 1.0`.
///
/// Arrays are ordered and objects must have identical key sets.
#[must_use]
pub fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| json_equal(x, y)))
        }
        _ => a == b,
    }
}

fn numbers_equal(x: &serde_json::Number, y: &serde_json::Number) -> bool {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return a == b;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn null_expectation_matches_anything() {
        assert!(matches_value(&json!({"a": 1}), &Value::Null));
        assert!(matches_value(&Value::Null, &Value::Null));
        assert!(matches_value(&json!("x"), &Value::Null));
    }

    #[test]
    fn empty_object_is_dont_care() {
        assert!(matches_value(&json!([1, 2]), &json!({})));
        assert!(matches_value(&json!("text"), &json!({})));
    }

    #[test]
    fn extra_actual_keys_ignored() {
        let actual = json!({"name": "Jack", "age": 21});
        assert!(matches_value(&actual, &json!({"name": "Jack"})));
    }

    #[test]
    fn missing_key_fails() {
        let actual = json!({"name": "Jack"});
        assert!(!matches_value(&actual, &json!({"age": 21})));
    }

    #[test]
    fn object_expected_but_scalar_received() {
        assert!(!matches_value(&json!("Jack"), &json!({"name": "Jack"})));
        assert!(!matches_value(&json!([{"name": "Jack"}]), &json!({"name": "Jack"})));
    }

    #[test]
    fn nested_objects_are_subsets_too() {
        let actual = json!({"user": {"name": "Jack", "id": 7}, "meta": {}});
        assert!(matches_value(&actual, &json!({"user": {"id": 7}})));
        assert!(!matches_value(&actual, &json!({"user": {"id": 8}})));
    }

    #[test]
    fn nested_null_expects_nothing() {
        let actual = json!({"token": "abc"});
        assert!(matches_value(&actual, &json!({"token": null})));
    }

    #[test]
    fn arrays_are_exact_and_ordered() {
        assert!(!matches_value(&json!([1, 2]), &json!([2, 1])));
        assert!(!matches_value(&json!([1, 2, 3]), &json!([1, 2])));
        assert!(matches_value(&json!({"a": [1, 2]}), &json!({"a": [1, 2]})));
    }

    #[test]
    fn objects_inside_arrays_compare_exactly() {
        let actual = json!([{"id": 1, "extra": true}]);
        assert!(!matches_value(&actual, &json!([{"id": 1}])));
        assert!(matches_value(&actual, &json!([{"extra": true, "id": 1}])));
    }

    #[test]
    fn numbers_compare_by_value() {
        assert!(matches_value(&json!(1.0), &json!(1)));
        assert!(matches_value(&json!({"n": 21}), &json!({"n": 21.0})));
        assert!(!matches_value(&json!(1.5), &json!(1)));
        assert!(matches_value(&json!(u64::MAX), &json!(u64::MAX)));
    }

    #[test]
    fn scalar_type_mismatch_fails() {
        assert!(!matches_value(&json!("1"), &json!(1)));
        assert!(!matches_value(&json!(true), &json!("true")));
        assert!(!matches_value(&Value::Null, &json!(false)));
    }

    fn leaf() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<bool>().prop_map(Value::Bool),
            any::<i32>().prop_map(|n| json!(n)),
            "[a-z]{0,6}".prop_map(Value::String),
        ]
    }

    fn json_tree() -> impl Strategy<Value = Value> {
        leaf().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                proptest::collection::btree_map("[a-d]", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    /// Drop every other key of each object, recursively.
    fn submap(value: &Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(
                map.iter()
                    .enumerate()
                    .filter(|(i, _)| i % 2 == 0)
                    .map(|(_, (k, v))| (k.clone(), submap(v)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    proptest! {
        #[test]
        fn anything_matches_null(actual in json_tree()) {
            prop_assert!(matches_value(&actual, &Value::Null));
        }

        #[test]
        fn every_value_matches_itself(actual in json_tree()) {
            prop_assert!(matches_value(&actual, &actual));
        }

        #[test]
        fn submaps_match(actual in json_tree()) {
            let expected = submap(&actual);
            prop_assert!(matches_value(&actual, &expected));
        }
    }
}
