//! Domain entities, validation rules, services, and ports.
//!
//! Types here are transport and storage agnostic. The inbound HTTP adapter
//! maps [`Error`] into the response envelope; outbound adapters implement
//! the traits under [`ports`].

pub mod error;
pub mod fields;
pub mod order;
pub mod ports;
pub mod user;

mod orders_service;
mod users_service;

pub use self::error::{Error, ErrorCode};
pub use self::fields::FieldErrors;
pub use self::order::{NewOrder, Order, OrderDraft, OrderPatch, OrderWithOwner};
pub use self::orders_service::OrderService;
pub use self::user::{NewUser, User, UserDraft, UserPatch};
pub use self::users_service::UserService;

/// Map a persistence failure onto the unexpected-error category, keeping the
/// underlying error text for the 500 payload.
pub(crate) fn storage_error(err: impl std::fmt::Display) -> Error {
    Error::internal(err.to_string())
}
