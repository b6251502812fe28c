//! Per-field validation error accumulator.
//!
//! Validation failures are reported to clients as a mapping from field name
//! to a list of messages. `FieldErrors` collects those messages while the
//! remaining fields are still being checked, so a single response carries
//! every rule violation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Mapping from field name to validation messages.
///
/// Keys are stored in a `BTreeMap` so serialised output is deterministic.
///
/// # Examples
/// ```
/// use backend::domain::FieldErrors;
///
/// let mut errors = FieldErrors::new();
/// errors.push("age", "age must be greater than 0");
/// assert!(!errors.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an accumulator holding a single message for one field.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    /// Append a message for the given field.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Record a failed check against `field`, passing accepted values through.
    ///
    /// Returns `Some` with the accepted value, or `None` after appending the
    /// rejection message.
    pub fn collect<T>(&mut self, field: &str, checked: Result<T, String>) -> Option<T> {
        match checked {
            Ok(value) => Some(value),
            Err(message) => {
                self.push(field, message);
                None
            }
        }
    }

    /// True when no field has any recorded message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for a field, if any.
    #[must_use]
    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}
