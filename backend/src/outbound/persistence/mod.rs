//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports, backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! The adapters are thin: they translate between Diesel row structs and
//! domain types, and map database errors onto the ports' persistence error
//! enums. Row structs (`models.rs`) and table definitions (`schema.rs`) are
//! implementation details and never cross into the domain layer.

mod diesel_order_repository;
mod diesel_user_repository;
mod error_mapping;
mod models;
mod pool;
mod schema;

pub use diesel_order_repository::DieselOrderRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
