#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # yay-value
//!
//! Format-neutral value tree for records handed to the yay validator.
//!
//! Embedding applications convert whatever they already hold (decoded JSON,
//! form fields, configuration maps) into a [`Value`] and validate that. The
//! tree mirrors the shapes a dynamic payload can take: null, booleans,
//! integers, floats, strings, arrays and keyed records.

/// JSON text and `serde_json` conversions.
pub mod json;
/// Core value tree and type queries.
pub mod value;

/// Primary value type and its keyed-record form.
pub use value::{Record, Value};

use thiserror::Error;

/// Errors that can occur when building or converting values
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },
}

impl Error {
    /// Build a type-mismatch error from the expected kind and the value found.
    pub fn type_mismatch(expected: impl Into<String>, found: &Value) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.type_name().to_string(),
        }
    }
}

/// Crate-local result type for value operations.
pub type Result<T> = std::result::Result<T, Error>;
