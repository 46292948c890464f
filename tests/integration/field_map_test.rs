// FieldMap configuration integration tests
use bitmask_fields::{ConfigError, FieldMap, codec};
use serde_json::json;

#[test]
fn test_config_forms() {
    let fields = FieldMap::from_value(&json!({
        "banOption": [1, true],
        "adminOption": [2, false],
        "isConfidantOption": [4],
        "emailNotVerifyOption": 8,
    }))
    .unwrap();

    assert_eq!(
        fields.bits().collect::<Vec<_>>(),
        vec![
            ("banOption", 1),
            ("adminOption", 2),
            ("isConfidantOption", 4),
            ("emailNotVerifyOption", 8),
        ]
    );

    let defaults = fields.defaults();
    assert_eq!(defaults.get("banOption"), Some(true));
    assert_eq!(defaults.get("adminOption"), Some(false));
    assert_eq!(defaults.get("isConfidantOption"), Some(false));
    assert_eq!(defaults.get("emailNotVerifyOption"), Some(false));
}

#[test]
fn test_config_errors_display() {
    let err = FieldMap::from_value(&json!(null)).unwrap_err();
    assert_eq!(err, ConfigError::MissingFields);
    assert!(err.to_string().starts_with("MissingFields"));

    let err = FieldMap::from_value(&json!({"banOption": []})).unwrap_err();
    assert_eq!(err.to_string(), "MissingBit: the \"banOption\" field must have a bit mask");
}

#[test]
fn test_codec_with_config() {
    let fields = FieldMap::from_value(&json!({"a": 1, "b": 2, "c": 4})).unwrap();
    let values = codec::decode(0b101, &fields);
    assert_eq!(values.get("a"), Some(true));
    assert_eq!(values.get("b"), Some(false));
    assert_eq!(values.get("c"), Some(true));
    assert_eq!(codec::encode(&values, &fields), 0b101);
    assert_eq!(codec::encode(&codec::decode(0b1101, &fields), &fields), 0b101);
}

#[cfg(feature = "builder")]
#[test]
fn test_yaml_config() {
    let yaml = r#"
spamOption: 1
deletedOption: [2]
bannedOption: [4, true]
"#;
    let fields = FieldMap::from_yaml(yaml).unwrap();
    assert_eq!(fields.union(), 7);
    assert_eq!(fields.defaults().get("bannedOption"), Some(true));
}
