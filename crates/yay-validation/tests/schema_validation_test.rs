//! End-to-end schema validation scenarios

use serde_json::json;
use std::sync::Arc;
use std::thread;
use yay_validation::{
    NOT_ALLOWED_MESSAGE, Schema, StrictnessLevel, ValidationConfig, ValidationEngine, Yay,
};
use yay_value::Value;

/// Registration payload schema used across the scenarios
fn signup_schema() -> Schema {
    Schema::new()
        .field("username", Yay::item().required().string().min_length(3).max_length(16))
        .field("code", Yay::item().required().str_is_upper_alpha_numeric())
        .field("cpf", Yay::item().required().str_has_only_digits().length(11))
        .field("birth_date", Yay::item().required().is_brazil_date_format())
        .field("level", Yay::item().optional().integer().is_number_between(0.0..=10.0))
        .field("newsletter", Yay::item().optional().bool())
        .field(
            "address",
            Yay::item().required().object(
                Schema::new()
                    .field("uf", Yay::item().required().string().length(2).str_is_alpha())
                    .field("zip", Yay::item().required().str_has_only_digits()),
            ),
        )
        .field(
            "tags",
            Yay::item()
                .optional()
                .array()
                .max_length(3)
                .items_of_type(Yay::item().string().min_length(1)),
        )
}

fn valid_signup() -> serde_json::Value {
    json!({
        "username": "marcio",
        "code": "USR_01",
        "cpf": "12345678990",
        "birth_date": "28/02/1990",
        "level": 3,
        "newsletter": true,
        "address": { "uf": "RJ", "zip": "20000000" },
        "tags": ["rust", "php"]
    })
}

#[test]
fn test_valid_record_passes_both_modes() {
    let schema = signup_schema();
    let record = Value::from(valid_signup());

    assert!(Yay::validate(&schema, &record, false).is_none());
    assert!(Yay::validate(&schema, &record, true).is_none());
}

#[test]
fn test_optional_fields_may_be_absent_or_null() {
    let schema = signup_schema();
    let mut payload = valid_signup();
    let fields = payload.as_object_mut().expect("object payload");
    fields.remove("level");
    fields.remove("tags");
    fields.insert("newsletter".to_string(), json!(null));

    assert!(Yay::validate(&schema, &Value::from(payload), true).is_none());
}

#[test]
fn test_first_failing_rule_reported() {
    let schema = signup_schema();
    let mut payload = valid_signup();
    payload["username"] = json!(42);
    payload["cpf"] = json!("123");

    let errors = Yay::validate(&schema, &Value::from(payload), false).expect("errors");
    // string() fails before min_length(3) is considered
    assert_eq!(errors.get("username"), Some("needs to be a string"));
    // str_has_only_digits passes, length(11) fails
    assert_eq!(errors.get("cpf"), Some("needs to have a length of 11"));
    assert_eq!(errors.len(), 2);
}

#[test]
fn test_strict_errors_superset_of_lenient() {
    let schema = signup_schema();
    let mut payload = valid_signup();
    payload["level"] = json!(11);
    payload["referrer"] = json!("friend");
    payload["utm"] = json!({ "source": "ad" });
    let record = Value::from(payload);

    let lenient = Yay::validate(&schema, &record, false).expect("lenient errors");
    let strict = Yay::validate(&schema, &record, true).expect("strict errors");

    for (field, message) in lenient.iter() {
        assert_eq!(strict.get(field), Some(message));
    }

    let extra: Vec<_> = strict
        .iter()
        .filter(|(field, _)| !lenient.contains(field))
        .collect();
    assert_eq!(
        extra,
        vec![("referrer", NOT_ALLOWED_MESSAGE), ("utm", NOT_ALLOWED_MESSAGE)]
    );
}

#[test]
fn test_nested_object_and_array_failures() {
    let schema = signup_schema();
    let mut payload = valid_signup();
    payload["address"] = json!({ "uf": "R1", "zip": "20000000" });
    payload["tags"] = json!(["rust", ""]);

    let errors = Yay::validate(&schema, &Value::from(payload), false).expect("errors");
    assert_eq!(
        errors.get("address"),
        Some(r#"object needs to have schema: {"uf":"can have only alpha characters"}"#)
    );
    assert_eq!(errors.get("tags"), Some("array items has a min length of 1"));
}

#[test]
fn test_empty_record_reports_required_only() {
    let errors = Yay::validate(&signup_schema(), &Value::object(), true).expect("errors");

    let fields: Vec<_> = errors.iter().map(|(field, _)| field).collect();
    assert_eq!(
        fields,
        vec!["address", "birth_date", "code", "cpf", "username"]
    );
    assert!(errors.iter().all(|(_, message)| message == "is required"));
}

#[test]
fn test_engine_with_config() {
    let engine = ValidationEngine::with_config(
        ValidationConfig::new()
            .strictness(StrictnessLevel::Strict)
            .max_errors(1),
    );
    assert_eq!(engine.config().max_errors, 1);

    let errors = engine
        .validate(&signup_schema(), &Value::from(json!({ "unknown": 1 })))
        .expect("errors");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("username"), Some("is required"));
}

#[test]
fn test_validate_json_text() -> anyhow::Result<()> {
    let schema = signup_schema();
    let text = serde_json::to_string(&valid_signup())?;

    assert!(Yay::validate_json(&schema, &text, true)?.is_none());

    let errors = Yay::validate_json(&schema, "null", false)?.expect("errors");
    assert_eq!(errors.len(), 5);
    Ok(())
}

#[test]
fn test_shared_schema_across_threads() {
    let schema = Arc::new(signup_schema());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                let mut payload = valid_signup();
                payload["level"] = json!(i * 5);
                Yay::validate(&schema, &Value::from(payload), true)
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("validation thread panicked"))
        .collect();

    assert!(results[0].is_none());
    assert!(results[1].is_none());
    assert!(results[2].is_none());
    assert_eq!(
        results[3].as_ref().and_then(|e| e.get("level")),
        Some("needs to be a number between the values 0 and 10")
    );
}
