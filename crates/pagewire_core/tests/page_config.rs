use pagewire_core::{ConfigError, PageConfig, ValidationRules};
use std::time::Duration;

#[test]
fn empty_object_yields_defaults() {
    let config = PageConfig::from_json_str("{}").expect("empty config");
    assert_eq!(config, PageConfig::default());
    assert_eq!(config.element_ids.user_form, "user-form");
    assert_eq!(config.error_auto_clear(), Duration::from_millis(5000));
    assert_eq!(config.validation, ValidationRules::default());
}

#[test]
fn partial_overrides_keep_remaining_defaults() {
    let config = PageConfig::from_json_str(
        r#"{
            "elementIds": { "userInput": "comment-box" },
            "errorAutoClearMs": 1500,
            "validation": { "maxChars": 20 }
        }"#,
    )
    .expect("partial config");

    assert_eq!(config.element_ids.user_input, "comment-box");
    assert_eq!(config.element_ids.dynamic_content, "dynamic-content");
    assert_eq!(config.error_auto_clear_ms, 1500);
    assert_eq!(config.validation.min_chars, 3);
    assert_eq!(config.validation.max_chars, 20);
}

#[test]
fn rejects_invalid_identifiers_and_bounds() {
    let err = PageConfig::from_json_str(r#"{"elementIds":{"userForm":"user form"}}"#)
        .expect_err("space in id");
    assert_eq!(
        err,
        ConfigError::InvalidElementId {
            field: "userForm",
            value: "user form".to_string(),
        }
    );

    let err = PageConfig::from_json_str(r#"{"validation":{"minChars":10,"maxChars":5}}"#)
        .expect_err("inverted bounds");
    assert_eq!(err, ConfigError::InvalidBounds { min: 10, max: 5 });

    let err = PageConfig::from_json_str("[1, 2]").expect_err("not an object");
    assert!(matches!(err, ConfigError::Parse(_)));
}
