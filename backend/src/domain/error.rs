//! Domain-level error type.
//!
//! Transport agnostic: the HTTP adapter maps these errors to response status
//! codes and the uniform response envelope. Three categories exist:
//! validation failures, missing entities, and unexpected internal failures.

use crate::domain::FieldErrors;

/// Stable identifier for the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The request is malformed or fails one or more validation rules.
    Validation,
    /// The requested entity, or an entity it references, does not exist.
    NotFound,
    /// An unexpected failure occurred (storage unavailable, bad row, …).
    Internal,
}

/// Domain error payload.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("user not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    field_errors: Option<FieldErrors>,
}

impl Error {
    /// Aggregated validation failure carrying per-field messages.
    #[must_use]
    pub fn validation(field_errors: FieldErrors) -> Self {
        Self {
            code: ErrorCode::Validation,
            message: "validation failed".to_owned(),
            field_errors: Some(field_errors),
        }
    }

    /// Validation-category failure with a message but no field breakdown,
    /// such as a missing or unresolvable entity reference on create.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Validation,
            message: message.into(),
            field_errors: None,
        }
    }

    /// The requested or referenced entity does not exist.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::NotFound,
            message: message.into(),
            field_errors: None,
        }
    }

    /// Unexpected failure; the message carries the underlying error text.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Internal,
            message: message.into(),
            field_errors: None,
        }
    }

    /// The failure category.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Per-field messages, present only for aggregated validation failures.
    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        self.field_errors.as_ref()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
