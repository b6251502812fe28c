//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (users, orders,
//!   health)
//! - **Schemas**: Domain types and the response envelopes
//!
//! The generated specification is used by Swagger UI (debug builds).

use utoipa::OpenApi;

use crate::domain::{FieldErrors, Order, OrderWithOwner, User};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::orders::OrderBody;
use crate::inbound::http::users::UserBody;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Orders backend API",
        description = "HTTP interface for managing users and their orders."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::orders::list_orders,
        crate::inbound::http::orders::create_order,
        crate::inbound::http::orders::get_order,
        crate::inbound::http::orders::update_order,
        crate::inbound::http::orders::delete_order,
        crate::inbound::http::orders::list_user_orders,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Order,
        OrderWithOwner,
        UserBody,
        OrderBody,
        ErrorEnvelope,
        FieldErrors
    )),
    tags(
        (name = "users", description = "Operations related to users"),
        (name = "orders", description = "Operations related to orders"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_user_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user_schema = schemas.get("User").expect("User schema");

        assert_object_schema_has_field(user_schema, "id");
        assert_object_schema_has_field(user_schema, "email");
        assert_object_schema_has_field(user_schema, "age");
    }

    #[test]
    fn openapi_registers_every_resource_path() {
        let doc = ApiDoc::openapi();
        for path in ["/users/", "/users/{id}/", "/orders/", "/orders/{id}/", "/users/{id}/orders/"] {
            assert!(
                doc.paths.paths.contains_key(path),
                "document should describe {path}"
            );
        }
    }
}
