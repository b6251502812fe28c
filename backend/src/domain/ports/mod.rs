//! Ports decoupling the domain services from storage adapters.

pub mod order_repository;
pub mod user_repository;

pub use order_repository::{OrderPersistenceError, OrderRepository};
pub use user_repository::{UserPersistenceError, UserRepository};
