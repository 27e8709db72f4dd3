//! Field validator built from chained rules

use crate::rules::{Check, DateFormat, LengthBound, Predicate, Rule, RuleOutcome};
use crate::schema::Schema;
use std::ops::RangeInclusive;
use tracing::warn;
use yay_value::Value;

/// Default failure messages
pub mod messages {
    pub const REQUIRED: &str = "is required";
    pub const STRING: &str = "needs to be a string";
    pub const INTEGER: &str = "needs to be an integer";
    pub const FLOAT: &str = "needs to be a float";
    pub const BOOL: &str = "needs to be a boolean value";
    pub const ARRAY: &str = "needs to be an array";
    pub const MIN_LENGTH: &str = "has a min length of ";
    pub const MAX_LENGTH: &str = "has a max length of ";
    pub const LENGTH: &str = "needs to have a length of ";
    pub const ONLY_DIGITS: &str = "can have only digits";
    pub const ALPHA: &str = "can have only alpha characters";
    pub const UPPER_ALPHA_NUMERIC: &str = "can have only uppercase characters";
    pub const NUMBER_BETWEEN: &str = "needs to be a number between the values";
    pub const US_DATE: &str = "needs to have the date format YYYY-mm-dd";
    pub const BRAZIL_DATE: &str = "needs to have the date format dd/mm/YYYY";
    pub const OBJECT: &str = "needs to be an object";
}

/// Validator for a single field.
///
/// Rules run in the order they were added and the first failure wins. Build
/// one with [`crate::Yay::item`] and chain rule methods:
///
/// ```rust
/// use yay_validation::Yay;
/// use yay_value::Value;
///
/// let name = Yay::item().required().string().min_length(2);
/// assert_eq!(name.validate(&Value::from("Ana")), None);
/// assert_eq!(name.validate(&Value::Null), Some("is required".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct YayItem {
    rules: Vec<Rule>,
    optional: bool,
    is_array: bool,
    array_item: Option<Box<YayItem>>,
    object_schema: Option<Schema>,
}

impl YayItem {
    /// Create an empty validator; it accepts every value until rules are added
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a value, returning the first failing rule's message
    #[must_use]
    pub fn validate(&self, value: &Value) -> Option<String> {
        if value.is_null() && self.optional {
            return None;
        }

        self.rules.iter().find_map(|rule| rule.failure(value, self))
    }

    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        self.is_array
    }

    /// Rules in evaluation order
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Validator applied to each array element
    #[must_use]
    pub fn array_item(&self) -> Option<&YayItem> {
        self.array_item.as_deref()
    }

    /// Schema applied to object values
    #[must_use]
    pub fn object_schema(&self) -> Option<&Schema> {
        self.object_schema.as_ref()
    }

    #[must_use]
    pub fn required(self) -> Self {
        self.required_with(messages::REQUIRED)
    }

    /// Require a non-null value; also clears a previous [`optional`](Self::optional)
    #[must_use]
    pub fn required_with(mut self, message: impl Into<String>) -> Self {
        self.optional = false;
        self.push(message, Check::Required)
    }

    /// Accept null/absent values regardless of the other rules
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn string(self) -> Self {
        self.string_with(messages::STRING)
    }

    #[must_use]
    pub fn string_with(self, message: impl Into<String>) -> Self {
        self.push(message, Check::String)
    }

    #[must_use]
    pub fn integer(self) -> Self {
        self.integer_with(messages::INTEGER)
    }

    /// Integers only; floats and numeric strings fail
    #[must_use]
    pub fn integer_with(self, message: impl Into<String>) -> Self {
        self.push(message, Check::Integer)
    }

    #[must_use]
    pub fn float(self) -> Self {
        self.float_with(messages::FLOAT)
    }

    /// Any number; numeric strings fail
    #[must_use]
    pub fn float_with(self, message: impl Into<String>) -> Self {
        self.push(message, Check::Float)
    }

    #[must_use]
    pub fn bool(self) -> Self {
        self.bool_with(messages::BOOL)
    }

    #[must_use]
    pub fn bool_with(self, message: impl Into<String>) -> Self {
        self.push(message, Check::Bool)
    }

    #[must_use]
    pub fn array(self) -> Self {
        self.array_with(messages::ARRAY)
    }

    /// Require an array; length rules then count elements
    #[must_use]
    pub fn array_with(mut self, message: impl Into<String>) -> Self {
        self.is_array = true;
        self.push(message, Check::Array)
    }

    /// Validate every element with `item`.
    ///
    /// Only takes effect after [`array`](Self::array). The first failing
    /// element is reported as `"array items <message>"`.
    #[must_use]
    pub fn items_of_type(mut self, item: YayItem) -> Self {
        if !self.is_array {
            warn!("items_of_type ignored: validator is not declared as an array");
            return self;
        }

        self.array_item = Some(Box::new(item));
        self.push(String::new(), Check::ItemsOfType)
    }

    #[must_use]
    pub fn min_length(self, min: usize) -> Self {
        self.min_length_with(min, messages::MIN_LENGTH)
    }

    /// `prefix` is followed by `min` in the failure message
    #[must_use]
    pub fn min_length_with(self, min: usize, prefix: impl Into<String>) -> Self {
        self.push_length(LengthBound::Min, min, prefix)
    }

    #[must_use]
    pub fn max_length(self, max: usize) -> Self {
        self.max_length_with(max, messages::MAX_LENGTH)
    }

    #[must_use]
    pub fn max_length_with(self, max: usize, prefix: impl Into<String>) -> Self {
        self.push_length(LengthBound::Max, max, prefix)
    }

    #[must_use]
    pub fn length(self, length: usize) -> Self {
        self.length_with(length, messages::LENGTH)
    }

    #[must_use]
    pub fn length_with(self, length: usize, prefix: impl Into<String>) -> Self {
        self.push_length(LengthBound::Exact, length, prefix)
    }

    #[must_use]
    pub fn str_has_only_digits(self) -> Self {
        self.str_has_only_digits_with(messages::ONLY_DIGITS)
    }

    /// Non-empty string of ASCII digits; numbers fail
    #[must_use]
    pub fn str_has_only_digits_with(self, message: impl Into<String>) -> Self {
        self.push(message, Check::DigitsOnly)
    }

    #[must_use]
    pub fn str_is_alpha(self) -> Self {
        self.str_is_alpha_with(messages::ALPHA)
    }

    /// Non-empty string of ASCII letters
    #[must_use]
    pub fn str_is_alpha_with(self, message: impl Into<String>) -> Self {
        self.push(message, Check::Alpha)
    }

    #[must_use]
    pub fn str_is_upper_alpha_numeric(self) -> Self {
        self.str_is_upper_alpha_numeric_with(messages::UPPER_ALPHA_NUMERIC)
    }

    /// String matching `^[A-Z]+[A-Z0-9._]+$`
    #[must_use]
    pub fn str_is_upper_alpha_numeric_with(self, message: impl Into<String>) -> Self {
        self.push(message, Check::UpperAlphaNumeric)
    }

    #[must_use]
    pub fn is_number_between(self, range: RangeInclusive<f64>) -> Self {
        self.is_number_between_with(range, messages::NUMBER_BETWEEN)
    }

    /// Number within `range`, both ends inclusive.
    ///
    /// The bounds are appended to the message: `"<message> <lo> and <hi>"`.
    #[must_use]
    pub fn is_number_between_with(
        self,
        range: RangeInclusive<f64>,
        message: impl Into<String>,
    ) -> Self {
        let message = format!("{} {} and {}", message.into(), range.start(), range.end());
        self.push(message, Check::NumberBetween(range))
    }

    #[must_use]
    pub fn is_us_date_format(self) -> Self {
        self.is_us_date_format_with(messages::US_DATE)
    }

    /// Calendar-valid `YYYY-MM-DD` string
    #[must_use]
    pub fn is_us_date_format_with(self, message: impl Into<String>) -> Self {
        self.push(message, Check::Date(DateFormat::Us))
    }

    #[must_use]
    pub fn is_brazil_date_format(self) -> Self {
        self.is_brazil_date_format_with(messages::BRAZIL_DATE)
    }

    /// Calendar-valid `DD/MM/YYYY` string
    #[must_use]
    pub fn is_brazil_date_format_with(self, message: impl Into<String>) -> Self {
        self.push(message, Check::Date(DateFormat::Brazil))
    }

    #[must_use]
    pub fn object(self, schema: Schema) -> Self {
        self.object_with(schema, messages::OBJECT)
    }

    /// Require a record that passes `schema` (lenient).
    ///
    /// `message` is reported for non-record values; nested failures are
    /// reported as `"object needs to have schema: <errors as JSON>"`.
    #[must_use]
    pub fn object_with(mut self, schema: Schema, message: impl Into<String>) -> Self {
        self.object_schema = Some(schema);
        self.push(message, Check::Object)
    }

    /// Add a caller-defined rule.
    ///
    /// The closure may return a `bool` (false reports `message`), or a
    /// message-bearing value such as `Option<String>` that is reported verbatim.
    #[must_use]
    pub fn custom<F, O>(self, message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> O + Send + Sync + 'static,
        O: Into<RuleOutcome>,
    {
        self.push(message, Check::Custom(Predicate::new(predicate)))
    }

    fn push_length(self, bound: LengthBound, n: usize, prefix: impl Into<String>) -> Self {
        let message = format!("{}{n}", prefix.into());
        self.push(message, Check::Length(bound, n))
    }

    fn push(mut self, message: impl Into<String>, check: Check) -> Self {
        self.rules.push(Rule::new(message, check));
        self
    }
}
