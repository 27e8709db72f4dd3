//! Validation engine

use crate::errors::ValidationErrors;
use crate::item::YayItem;
use crate::schema::Schema;
use tracing::{debug, trace};
use yay_value::Value;

/// Message reported for input keys the schema does not declare
pub const NOT_ALLOWED_MESSAGE: &str = "is not allowed in the schema";

static ABSENT: Value = Value::Null;

/// Strictness level for validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrictnessLevel {
    /// Strict: reject keys the schema does not declare
    Strict,
    /// Lenient: ignore undeclared keys
    #[default]
    Lenient,
}

impl From<bool> for StrictnessLevel {
    fn from(strict: bool) -> Self {
        if strict {
            StrictnessLevel::Strict
        } else {
            StrictnessLevel::Lenient
        }
    }
}

/// Validation configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Strictness level
    pub strictness: StrictnessLevel,
    /// Maximum errors before stopping (0 = unlimited)
    pub max_errors: usize,
    /// Message reported for undeclared keys in strict mode
    pub extraneous_field_message: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            strictness: StrictnessLevel::Lenient,
            max_errors: 0,
            extraneous_field_message: NOT_ALLOWED_MESSAGE.to_string(),
        }
    }
}

impl ValidationConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn strictness(mut self, strictness: StrictnessLevel) -> Self {
        self.strictness = strictness;
        self
    }

    /// Shorthand for [`StrictnessLevel::Strict`]
    #[must_use]
    pub fn strict(self) -> Self {
        self.strictness(StrictnessLevel::Strict)
    }

    #[must_use]
    pub fn max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    #[must_use]
    pub fn extraneous_field_message(mut self, message: impl Into<String>) -> Self {
        self.extraneous_field_message = message.into();
        self
    }

    fn is_full(&self, errors: &ValidationErrors) -> bool {
        self.max_errors > 0 && errors.len() >= self.max_errors
    }
}

/// Schema validator driven by a [`ValidationConfig`]
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    config: ValidationConfig,
}

impl ValidationEngine {
    /// Create a lenient engine with unlimited errors
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with specific configuration
    #[must_use]
    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a record against `schema`.
    ///
    /// Null, and anything that is not an object, is treated as an empty
    /// record. Returns `None` when every field passes.
    #[must_use]
    pub fn validate(&self, schema: &Schema, record: &Value) -> Option<ValidationErrors> {
        let config = &self.config;
        let mut errors = ValidationErrors::new();

        for (name, item) in schema.iter() {
            if config.is_full(&errors) {
                break;
            }

            let value = record.get(name).unwrap_or(&ABSENT);
            if let Some(message) = item.validate(value) {
                trace!(field = name, message = %message, "field failed validation");
                errors.insert(name, message);
            }
        }

        if config.strictness == StrictnessLevel::Strict {
            if let Some(fields) = record.as_object() {
                for key in fields.keys().filter(|key| !schema.contains(key)) {
                    if config.is_full(&errors) {
                        break;
                    }
                    trace!(field = %key, "field not declared in schema");
                    errors.insert(key.as_str(), config.extraneous_field_message.as_str());
                }
            }
        }

        debug!(
            fields = schema.len(),
            errors = errors.len(),
            strict = config.strictness == StrictnessLevel::Strict,
            "schema validation finished"
        );

        errors.into_option()
    }
}

/// Validate with default settings at the given strictness
pub(crate) fn validate_record(
    schema: &Schema,
    record: &Value,
    strictness: StrictnessLevel,
) -> Option<ValidationErrors> {
    ValidationEngine::with_config(ValidationConfig::default().strictness(strictness))
        .validate(schema, record)
}

/// Entry points: build field validators and validate records.
///
/// ```rust
/// use yay_validation::{Schema, Yay};
/// use yay_value::Value;
///
/// let schema = Schema::new()
///     .field("name", Yay::item().required().string())
///     .field("age", Yay::item().integer());
///
/// let record = Value::record([("name", Value::from("X")), ("age", Value::from(18))]);
/// assert!(Yay::validate(&schema, &record, false).is_none());
/// ```
pub struct Yay;

impl Yay {
    /// Start a new field validator
    #[must_use]
    pub fn item() -> YayItem {
        YayItem::new()
    }

    /// Validate `record`; `strict` also rejects undeclared keys
    #[must_use]
    pub fn validate(schema: &Schema, record: &Value, strict: bool) -> Option<ValidationErrors> {
        validate_record(schema, record, strict.into())
    }

    #[must_use]
    pub fn validate_strict(schema: &Schema, record: &Value) -> Option<ValidationErrors> {
        validate_record(schema, record, StrictnessLevel::Strict)
    }

    /// Validate and turn failures into an error
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Invalid`] carrying every field error.
    pub fn check(schema: &Schema, record: &Value, strict: bool) -> crate::Result<()> {
        match Self::validate(schema, record, strict) {
            None => Ok(()),
            Some(errors) => Err(crate::Error::Invalid(errors)),
        }
    }

    /// Parse a JSON document and validate it as a record
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Value`] for malformed JSON and
    /// [`crate::Error::NotARecord`] when the document is neither an object nor null.
    pub fn validate_json(
        schema: &Schema,
        json: &str,
        strict: bool,
    ) -> crate::Result<Option<ValidationErrors>> {
        let record = Value::from_json_str(json)?;
        if !(record.is_object() || record.is_null()) {
            return Err(crate::Error::NotARecord {
                found: record.type_name().to_string(),
            });
        }
        Ok(Self::validate(schema, &record, strict))
    }
}
