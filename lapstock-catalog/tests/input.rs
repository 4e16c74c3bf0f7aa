use lapstock_catalog::RawValue;
use serde_json::json;

#[test]
fn positive_integers_are_identifiers() {
    assert_eq!(RawValue::classify(&json!(3)), RawValue::Identifier(3));
    assert_eq!(RawValue::classify(&json!(987654)), RawValue::Identifier(987654));
}

#[test]
fn zero_and_blank_are_empty() {
    assert_eq!(RawValue::classify(&json!(0)), RawValue::Empty);
    assert_eq!(RawValue::classify(&json!("0")), RawValue::Empty);
    assert_eq!(RawValue::classify(&json!("")), RawValue::Empty);
    assert_eq!(RawValue::classify(&json!("   ")), RawValue::Empty);
    assert_eq!(RawValue::classify_opt(None), RawValue::Empty);
}

#[test]
fn unusable_types_are_empty() {
    assert_eq!(RawValue::classify(&json!(null)), RawValue::Empty);
    assert_eq!(RawValue::classify(&json!(true)), RawValue::Empty);
    assert_eq!(RawValue::classify(&json!(-4)), RawValue::Empty);
    assert_eq!(RawValue::classify(&json!(2.5)), RawValue::Empty);
    assert_eq!(RawValue::classify(&json!(["Dell"])), RawValue::Empty);
    assert_eq!(RawValue::classify(&json!({"name": "Dell"})), RawValue::Empty);
}

#[test]
fn text_is_trimmed() {
    assert_eq!(
        RawValue::classify(&json!("  Dell  ")),
        RawValue::FreeText("Dell".to_string())
    );
}

#[test]
fn digit_strings_are_names() {
    assert_eq!(
        RawValue::classify(&json!("12")),
        RawValue::FreeText("12".to_string())
    );
}

#[test]
fn conversions() {
    assert_eq!(RawValue::from(5), RawValue::Identifier(5));
    assert_eq!(RawValue::from(0), RawValue::Empty);
    assert_eq!(RawValue::from(" HP "), RawValue::FreeText("HP".to_string()));
    assert_eq!(RawValue::from(""), RawValue::Empty);
}
