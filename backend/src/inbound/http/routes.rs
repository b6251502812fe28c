//! Route registration and request-extraction configuration.
//!
//! Shared between the server binary and handler tests so both exercise the
//! same routing table and error shaping.

use actix_web::web;

use crate::domain::Error;
use crate::inbound::http::{orders, users};

/// Register every resource route on the given service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::list_users)
        .service(users::create_user)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(orders::list_orders)
        .service(orders::create_order)
        .service(orders::get_order)
        .service(orders::update_order)
        .service(orders::delete_order)
        .service(orders::list_user_orders);
}

/// JSON extraction config routing malformed bodies into the error envelope.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| Error::bad_request(format!("invalid request body: {err}")).into())
}

/// Path extraction config: a non-numeric identifier behaves like an unknown
/// resource, matching the original routing semantics.
#[must_use]
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|_err, _req| Error::not_found("resource not found").into())
}
