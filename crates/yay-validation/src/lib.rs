#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # yay-validation
//!
//! Declarative field validation with fluent rule builders.
//!
//! A [`Schema`] maps field names to [`YayItem`] validators. Each validator is
//! an ordered list of rules; the first failing rule decides the field's
//! message. Validating a record yields either `None` (valid) or
//! [`ValidationErrors`], a map from field name to message.
//!
//! ## Example Usage
//!
//! ```rust
//! use yay_validation::{Schema, Yay};
//! use yay_value::Value;
//!
//! let schema = Schema::new()
//!     .field("name", Yay::item().required().string().max_length(20))
//!     .field("age", Yay::item().integer().is_number_between(0.0..=130.0))
//!     .field("nickname", Yay::item().optional().string());
//!
//! let record = Value::from_json_str(r#"{"name": "Ana", "age": 31, "weight": 63.5}"#).unwrap();
//!
//! assert!(Yay::validate(&schema, &record, false).is_none());
//!
//! let errors = Yay::validate(&schema, &record, true).unwrap();
//! assert_eq!(errors.get("weight"), Some("is not allowed in the schema"));
//! ```

pub mod engine;
pub mod errors;
pub mod item;
pub mod rules;
pub mod schema;

// Re-export main types
pub use engine::{NOT_ALLOWED_MESSAGE, StrictnessLevel, ValidationConfig, ValidationEngine, Yay};
pub use errors::ValidationErrors;
pub use item::{YayItem, messages};
pub use rules::{
    Check, DateFormat, LengthBound, Predicate, Rule, RuleOutcome, calc_length,
    is_upper_alpha_numeric, matches_date_format,
};
pub use schema::Schema;

use thiserror::Error;

/// Errors surfaced by the convenience entry points
#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation failed: {0}")]
    Invalid(ValidationErrors),

    #[error("Record must be an object, found {found}")]
    NotARecord { found: String },

    #[error("Value error: {0}")]
    Value(#[from] yay_value::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Convenience function to validate a record with default (lenient) settings
#[must_use]
pub fn validate(schema: &Schema, record: &yay_value::Value) -> Option<ValidationErrors> {
    ValidationEngine::new().validate(schema, record)
}
