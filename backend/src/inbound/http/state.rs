//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`, so they depend only on
//! the domain services and stay testable with in-memory repositories.

use std::sync::Arc;

use crate::domain::ports::{OrderRepository, UserRepository};
use crate::domain::{OrderService, UserService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: UserService,
    pub orders: OrderService,
}

impl HttpState {
    /// Wire services over the given repositories.
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>, orders: Arc<dyn OrderRepository>) -> Self {
        Self {
            users: UserService::new(Arc::clone(&users)),
            orders: OrderService::new(orders, users),
        }
    }
}
