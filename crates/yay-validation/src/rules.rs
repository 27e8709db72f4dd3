//! Validation rules

use crate::engine::{StrictnessLevel, validate_record};
use crate::item::YayItem;
use crate::schema::Schema;
use chrono::NaiveDate;
use regex::Regex;
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::{Arc, LazyLock};
use yay_value::Value;

static UPPER_ALPHA_NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]+[A-Z0-9._]+$").expect("upper alphanumeric pattern is valid")
});

/// Outcome of evaluating one rule against a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Value satisfies the rule
    Pass,
    /// Value fails; the rule's own message is reported
    Fail,
    /// Value fails with an explicit message, reported verbatim
    FailWith(String),
}

impl RuleOutcome {
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, RuleOutcome::Pass)
    }
}

impl From<bool> for RuleOutcome {
    fn from(passed: bool) -> Self {
        if passed {
            RuleOutcome::Pass
        } else {
            RuleOutcome::Fail
        }
    }
}

impl From<String> for RuleOutcome {
    fn from(message: String) -> Self {
        RuleOutcome::FailWith(message)
    }
}

impl From<&str> for RuleOutcome {
    fn from(message: &str) -> Self {
        RuleOutcome::FailWith(message.to_string())
    }
}

impl From<Option<String>> for RuleOutcome {
    fn from(message: Option<String>) -> Self {
        message.map_or(RuleOutcome::Pass, RuleOutcome::FailWith)
    }
}

impl From<Result<(), String>> for RuleOutcome {
    fn from(result: Result<(), String>) -> Self {
        result.err().into()
    }
}

/// User-supplied predicate wrapped by a custom rule
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(&Value) -> RuleOutcome + Send + Sync>);

impl Predicate {
    /// Wrap a closure returning anything convertible into a [`RuleOutcome`]
    pub fn new<F, O>(f: F) -> Self
    where
        F: Fn(&Value) -> O + Send + Sync + 'static,
        O: Into<RuleOutcome>,
    {
        Self(Arc::new(move |value: &Value| -> RuleOutcome { f(value).into() }))
    }

    #[must_use]
    pub fn call(&self, value: &Value) -> RuleOutcome {
        (self.0)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// Which side of a length comparison a rule enforces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthBound {
    Min,
    Max,
    Exact,
}

impl LengthBound {
    #[must_use]
    pub fn accepts(self, len: usize, n: usize) -> bool {
        match self {
            LengthBound::Min => len >= n,
            LengthBound::Max => len <= n,
            LengthBound::Exact => len == n,
        }
    }
}

/// Calendar formats accepted by the date rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `YYYY-MM-DD`
    Us,
    /// `DD/MM/YYYY`
    Brazil,
}

impl DateFormat {
    /// chrono format string for this layout
    #[must_use]
    pub fn pattern(self) -> &'static str {
        match self {
            DateFormat::Us => "%Y-%m-%d",
            DateFormat::Brazil => "%d/%m/%Y",
        }
    }
}

/// The predicate carried by a rule
#[derive(Debug, Clone)]
pub enum Check {
    Required,
    String,
    Integer,
    /// Any number, integer or floating
    Float,
    Bool,
    Array,
    /// Every element against the owning item's array validator
    ItemsOfType,
    Length(LengthBound, usize),
    DigitsOnly,
    Alpha,
    UpperAlphaNumeric,
    NumberBetween(RangeInclusive<f64>),
    Date(DateFormat),
    /// Record against the owning item's object schema
    Object,
    Custom(Predicate),
}

impl Check {
    /// Evaluate against a value; `owner` supplies the array flag and nested validators
    #[must_use]
    pub fn evaluate(&self, value: &Value, owner: &YayItem) -> RuleOutcome {
        match self {
            Check::Required => (!value.is_null()).into(),
            Check::String => value.is_string().into(),
            Check::Integer => value.is_integer().into(),
            Check::Float => value.is_number().into(),
            Check::Bool => value.is_bool().into(),
            Check::Array => value.is_array().into(),
            Check::ItemsOfType => owner
                .array_item()
                .map_or(RuleOutcome::Pass, |inner| validate_items(value, inner)),
            Check::Length(bound, n) => bound.accepts(calc_length(value, owner.is_array()), *n).into(),
            Check::DigitsOnly => value
                .as_str()
                .is_some_and(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))
                .into(),
            Check::Alpha => value
                .as_str()
                .is_some_and(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()))
                .into(),
            Check::UpperAlphaNumeric => value.as_str().is_some_and(is_upper_alpha_numeric).into(),
            Check::NumberBetween(range) => value.as_f64().is_some_and(|v| range.contains(&v)).into(),
            Check::Date(format) => value
                .as_str()
                .is_some_and(|s| matches_date_format(s, *format))
                .into(),
            Check::Object => owner
                .object_schema()
                .map_or(RuleOutcome::Pass, |schema| validate_object(value, schema)),
            Check::Custom(predicate) => predicate.call(value),
        }
    }
}

/// One predicate plus the message reported when it fails
#[derive(Debug, Clone)]
pub struct Rule {
    message: String,
    check: Check,
}

impl Rule {
    pub fn new(message: impl Into<String>, check: Check) -> Self {
        Self {
            message: message.into(),
            check,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn check(&self) -> &Check {
        &self.check
    }

    #[must_use]
    pub fn evaluate(&self, value: &Value, owner: &YayItem) -> RuleOutcome {
        self.check.evaluate(value, owner)
    }

    /// Failure message for `value`, or `None` when the rule passes
    #[must_use]
    pub fn failure(&self, value: &Value, owner: &YayItem) -> Option<String> {
        match self.evaluate(value, owner) {
            RuleOutcome::Pass => None,
            RuleOutcome::Fail => Some(self.message.clone()),
            RuleOutcome::FailWith(message) => Some(message),
        }
    }
}

/// Length used by the length rules.
///
/// Element count in array mode, character count otherwise. Values of any
/// other shape have length 0.
#[must_use]
pub fn calc_length(value: &Value, as_array: bool) -> usize {
    if as_array {
        value.as_array().map_or(0, <[Value]>::len)
    } else {
        value.as_str().map_or(0, |s| s.chars().count())
    }
}

/// True when `text` parses in `format` and formats back to the same text
#[must_use]
pub fn matches_date_format(text: &str, format: DateFormat) -> bool {
    let pattern = format.pattern();
    NaiveDate::parse_from_str(text, pattern)
        .is_ok_and(|date| date.format(pattern).to_string() == text)
}

#[must_use]
pub fn is_upper_alpha_numeric(text: &str) -> bool {
    UPPER_ALPHA_NUMERIC.is_match(text)
}

fn validate_items(value: &Value, inner: &YayItem) -> RuleOutcome {
    let Some(items) = value.as_array() else {
        return RuleOutcome::Pass;
    };

    items
        .iter()
        .find_map(|item| inner.validate(item))
        .map_or(RuleOutcome::Pass, |message| {
            RuleOutcome::FailWith(format!("array items {message}"))
        })
}

fn validate_object(value: &Value, schema: &Schema) -> RuleOutcome {
    if !value.is_object() {
        return RuleOutcome::Fail;
    }

    match validate_record(schema, value, StrictnessLevel::Lenient) {
        None => RuleOutcome::Pass,
        Some(errors) => {
            RuleOutcome::FailWith(format!("object needs to have schema: {}", errors.to_json()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_conversions() {
        assert_eq!(RuleOutcome::from(true), RuleOutcome::Pass);
        assert_eq!(RuleOutcome::from(false), RuleOutcome::Fail);
        assert_eq!(
            RuleOutcome::from("bad"),
            RuleOutcome::FailWith("bad".to_string())
        );
        assert_eq!(RuleOutcome::from(None::<String>), RuleOutcome::Pass);
        assert_eq!(
            RuleOutcome::from(Err::<(), String>("nope".to_string())),
            RuleOutcome::FailWith("nope".to_string())
        );
        assert!(RuleOutcome::from(Ok::<(), String>(())).is_pass());
    }

    #[test]
    fn test_length_bounds() {
        assert!(LengthBound::Min.accepts(5, 5));
        assert!(!LengthBound::Min.accepts(4, 5));
        assert!(LengthBound::Max.accepts(4, 4));
        assert!(!LengthBound::Max.accepts(6, 4));
        assert!(LengthBound::Exact.accepts(2, 2));
        assert!(!LengthBound::Exact.accepts(3, 2));
    }

    #[test]
    fn test_calc_length_counts_characters() {
        assert_eq!(calc_length(&Value::from("Márcio"), false), 6);
        assert_eq!("Márcio".len(), 7);
        assert_eq!(calc_length(&Value::from(""), false), 0);
    }

    #[test]
    fn test_calc_length_array_mode() {
        let items = Value::from(vec![Value::from(1), Value::from(2)]);
        assert_eq!(calc_length(&items, true), 2);
        assert_eq!(calc_length(&Value::from("ab"), true), 0);
    }

    #[test]
    fn test_calc_length_other_shapes_are_zero() {
        assert_eq!(calc_length(&Value::Null, false), 0);
        assert_eq!(calc_length(&Value::from(12345), false), 0);
        assert_eq!(calc_length(&Value::Null, true), 0);
    }

    #[test]
    fn test_us_date_format() {
        assert!(matches_date_format("2004-01-01", DateFormat::Us));
        assert!(matches_date_format("2024-02-29", DateFormat::Us));
        assert!(!matches_date_format("2023-02-29", DateFormat::Us));
        assert!(!matches_date_format("2000-13-19", DateFormat::Us));
        assert!(!matches_date_format("01/01/2004", DateFormat::Us));
        assert!(!matches_date_format("2004-1-1", DateFormat::Us));
        assert!(!matches_date_format("2004-01-01 ", DateFormat::Us));
        assert!(!matches_date_format("", DateFormat::Us));
    }

    #[test]
    fn test_brazil_date_format() {
        assert!(matches_date_format("01/01/2004", DateFormat::Brazil));
        assert!(matches_date_format("31/12/1999", DateFormat::Brazil));
        assert!(!matches_date_format("19/13/2000", DateFormat::Brazil));
        assert!(!matches_date_format("2004-01-01", DateFormat::Brazil));
        assert!(!matches_date_format("1/1/2004", DateFormat::Brazil));
    }

    #[test]
    fn test_upper_alpha_numeric_pattern() {
        assert!(is_upper_alpha_numeric("RJ2"));
        assert!(is_upper_alpha_numeric("AB"));
        assert!(is_upper_alpha_numeric("A.B_9"));
        assert!(!is_upper_alpha_numeric("A"));
        assert!(!is_upper_alpha_numeric("2RJ"));
        assert!(!is_upper_alpha_numeric("Márcio"));
        assert!(!is_upper_alpha_numeric("MÁRCIO 28!"));
    }

    #[test]
    fn test_rule_failure_message() {
        let owner = YayItem::new();
        let rule = Rule::new("needs to be a string", Check::String);

        assert_eq!(rule.failure(&Value::from("x"), &owner), None);
        assert_eq!(
            rule.failure(&Value::from(1), &owner),
            Some("needs to be a string".to_string())
        );
    }

    #[test]
    fn test_custom_rule_explicit_message() {
        let owner = YayItem::new();
        let rule = Rule::new(
            "unused",
            Check::Custom(Predicate::new(|value: &Value| {
                if value.is_null() {
                    Some("was null".to_string())
                } else {
                    None
                }
            })),
        );

        assert_eq!(rule.failure(&Value::Null, &owner), Some("was null".to_string()));
        assert_eq!(rule.failure(&Value::from(1), &owner), None);
    }

    #[test]
    fn test_number_between_rejects_strings() {
        let owner = YayItem::new();
        let check = Check::NumberBetween(-1.0..=5.0);

        assert!(check.evaluate(&Value::from(5), &owner).is_pass());
        assert!(check.evaluate(&Value::from(-1), &owner).is_pass());
        assert!(check.evaluate(&Value::from(2.5), &owner).is_pass());
        assert!(!check.evaluate(&Value::from("4"), &owner).is_pass());
        assert!(!check.evaluate(&Value::from(-2), &owner).is_pass());
        assert!(!check.evaluate(&Value::Float(f64::NAN), &owner).is_pass());
    }
}
