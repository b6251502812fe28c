//! Port abstraction for order persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewOrder, Order, OrderPatch, OrderWithOwner};

/// Persistence errors raised by order repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderPersistenceError {
    /// Repository connection could not be established.
    #[error("order store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("order store query failed: {message}")]
    Query { message: String },
    /// The foreign key on `user_id` rejected the write: the referenced user
    /// vanished between the existence check and the mutation.
    #[error("referenced user does not exist")]
    OwnerMissing,
}

impl OrderPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// CRUD access to the orders table. Reads join the owner snapshot so the
/// HTTP representation can embed it without a second round-trip.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// All orders with their owners, newest `created_at` first.
    async fn list(&self) -> Result<Vec<OrderWithOwner>, OrderPersistenceError>;

    /// Fetch an order and its owner by identifier.
    async fn find_by_id(&self, id: i32) -> Result<Option<OrderWithOwner>, OrderPersistenceError>;

    /// Persist a new order, assigning its id and timestamps.
    async fn insert(&self, new_order: &NewOrder) -> Result<Order, OrderPersistenceError>;

    /// Apply a partial update and refresh `updated_at`. Returns `None` when
    /// no order with `id` exists.
    async fn update(
        &self,
        id: i32,
        patch: &OrderPatch,
    ) -> Result<Option<Order>, OrderPersistenceError>;

    /// Delete an order. Returns `false` when no order with `id` exists.
    async fn delete(&self, id: i32) -> Result<bool, OrderPersistenceError>;

    /// All orders owned by `user_id`, newest first. The caller is expected
    /// to have resolved the user; an unknown id yields an empty list.
    async fn list_for_user(&self, user_id: i32)
    -> Result<Vec<OrderWithOwner>, OrderPersistenceError>;
}
