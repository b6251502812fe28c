//! Order entity and field validation rules.
//!
//! Serialisation contract: the raw owner id renders as `user` and read
//! representations additionally embed the owner snapshot as `user_detail`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::User;

/// Minimum accepted title length after trimming.
pub const TITLE_MIN_LEN: usize = 3;
/// Maximum accepted title length.
pub const TITLE_MAX_LEN: usize = 200;
/// Minimum accepted description length after trimming.
pub const DESCRIPTION_MIN_LEN: usize = 10;

pub(crate) const USER_REF_REQUIRED: &str = "user id is required";
pub(crate) const USER_REF_MISSING: &str = "user with the given id does not exist";

/// A persisted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    /// System-assigned identifier.
    pub id: i32,
    pub title: String,
    pub description: String,
    /// Identifier of the owning user.
    #[serde(rename = "user")]
    pub user_id: i32,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

/// An order joined with a read-only snapshot of its owner.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OrderWithOwner {
    #[serde(flatten)]
    pub order: Order,
    /// Owner snapshot embedded alongside the raw `user` id.
    #[serde(rename = "user_detail")]
    pub owner: User,
}

/// Validated fields for inserting a new order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub title: String,
    pub description: String,
    pub user_id: i32,
}

/// Validated partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub user_id: Option<i32>,
}

/// Raw order fields as supplied by a request body, prior to validation.
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub user: Option<i64>,
}

/// Accept an order title: present, trimmed non-empty, within length bounds.
pub fn check_title(value: Option<&str>) -> Result<String, String> {
    check_text_field("title", value, TITLE_MIN_LEN, Some(TITLE_MAX_LEN))
}

/// Accept an order description: present, trimmed non-empty, long enough.
pub fn check_description(value: Option<&str>) -> Result<String, String> {
    check_text_field("description", value, DESCRIPTION_MIN_LEN, None)
}

fn check_text_field(
    field: &str,
    value: Option<&str>,
    min_len: usize,
    max_len: Option<usize>,
) -> Result<String, String> {
    let Some(raw) = value else {
        return Err(format!("{field} is required"));
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if trimmed.chars().count() < min_len {
        return Err(format!("{field} must be at least {min_len} characters"));
    }
    if let Some(max) = max_len {
        if trimmed.chars().count() > max {
            return Err(format!("{field} must be at most {max} characters"));
        }
    }
    Ok(trimmed.to_owned())
}
