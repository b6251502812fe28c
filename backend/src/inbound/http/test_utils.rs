//! Helpers for handler tests: an app over in-memory repositories.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error as ActixError, web};

use crate::inbound::http::routes;
use crate::inbound::http::state::HttpState;
use crate::test_support::{InMemoryOrderRepository, InMemoryStore, InMemoryUserRepository};

/// Build an `HttpState` backed by a fresh in-memory store.
pub fn in_memory_state() -> HttpState {
    let store = InMemoryStore::new();
    HttpState::new(
        Arc::new(InMemoryUserRepository::new(Arc::clone(&store))),
        Arc::new(InMemoryOrderRepository::new(store)),
    )
}

/// Build a test app with the full routing table and extraction config.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = ActixError,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(routes::json_config())
        .app_data(routes::path_config())
        .configure(routes::configure)
}
