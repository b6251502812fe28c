//! User entity and field validation rules.
//!
//! Serialisation contract: `id`, `name`, `email`, `age`, `created_at`,
//! `updated_at`; timestamps render as RFC 3339.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum accepted length for a user name.
pub const NAME_MAX_LEN: usize = 100;

/// Maximum accepted length for an email address, matching the column width.
pub const EMAIL_MAX_LEN: usize = 254;

/// Inclusive age bounds.
pub const AGE_MIN: i64 = 1;
/// Upper inclusive age bound.
pub const AGE_MAX: i64 = 150;

pub(crate) const DUPLICATE_EMAIL: &str = "a user with this email already exists";

/// A persisted user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// System-assigned identifier.
    pub id: i32,
    pub name: String,
    /// Globally unique, syntactically valid email address.
    pub email: String,
    pub age: i32,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for inserting a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// Validated partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

/// Raw user fields as supplied by a request body, prior to validation.
#[derive(Debug, Clone, Default)]
pub struct UserDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i64>,
}

/// Accept a user name: present, non-blank, at most [`NAME_MAX_LEN`] characters.
pub fn check_name(value: Option<&str>) -> Result<String, String> {
    let Some(raw) = value else {
        return Err("name is required".to_owned());
    };
    if raw.trim().is_empty() {
        return Err("name is required".to_owned());
    }
    if raw.chars().count() > NAME_MAX_LEN {
        return Err(format!("name must be at most {NAME_MAX_LEN} characters"));
    }
    Ok(raw.to_owned())
}

/// Accept an email address: present, syntactically valid, and within the
/// store's [`EMAIL_MAX_LEN`] column width.
///
/// Uniqueness is a repository concern and checked separately.
pub fn check_email(value: Option<&str>) -> Result<String, String> {
    let Some(raw) = value else {
        return Err("email is required".to_owned());
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("email is required".to_owned());
    }
    if !is_valid_email(trimmed) {
        return Err("email must be a valid email address".to_owned());
    }
    if trimmed.chars().count() > EMAIL_MAX_LEN {
        return Err(format!("email must be at most {EMAIL_MAX_LEN} characters"));
    }
    Ok(trimmed.to_owned())
}

/// Accept an age in the inclusive range [[`AGE_MIN`], [`AGE_MAX`]].
///
/// The failure message distinguishes the two bounds.
pub fn check_age(value: Option<i64>) -> Result<i32, String> {
    let Some(age) = value else {
        return Err("age is required".to_owned());
    };
    if age < AGE_MIN {
        return Err("age must be greater than 0".to_owned());
    }
    if age > AGE_MAX {
        return Err(format!("age must be at most {AGE_MAX}"));
    }
    // Bounds guarantee the value fits.
    i32::try_from(age).map_err(|_| format!("age must be at most {AGE_MAX}"))
}

/// Minimal syntactic email check: one `@`, a non-empty local part, a domain
/// containing a dot, and no whitespace anywhere.
fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}
