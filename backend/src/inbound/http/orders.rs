//! Order HTTP handlers.
//!
//! ```text
//! GET    /orders/
//! POST   /orders/        {"title":"…","description":"…","user":1}
//! GET    /orders/{id}/
//! PUT    /orders/{id}/   partial update
//! DELETE /orders/{id}/
//! GET    /users/{id}/orders/
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{OrderDraft, OrderWithOwner};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, envelope};

/// Request body for creating or partially updating an order.
///
/// `user` is the raw owner id; read representations embed the resolved
/// snapshot as `user_detail`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrderBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub user: Option<i64>,
}

impl From<OrderBody> for OrderDraft {
    fn from(body: OrderBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            user: body.user,
        }
    }
}

/// List all orders with embedded owner snapshots, newest first.
#[utoipa::path(
    get,
    path = "/orders/",
    responses(
        (status = 200, description = "Orders wrapped in the success envelope", body = [OrderWithOwner]),
        (status = 500, description = "Unexpected failure", body = crate::inbound::http::error::ErrorEnvelope)
    ),
    tags = ["orders"],
    operation_id = "listOrders"
)]
#[get("/orders/")]
pub async fn list_orders(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let orders = state.orders.list().await?;
    Ok(envelope::ok(orders))
}

/// Create an order for an existing user.
#[utoipa::path(
    post,
    path = "/orders/",
    request_body = OrderBody,
    responses(
        (status = 201, description = "Order created", body = OrderWithOwner),
        (status = 400, description = "Validation failure or unresolvable user reference", body = crate::inbound::http::error::ErrorEnvelope),
        (status = 500, description = "Unexpected failure", body = crate::inbound::http::error::ErrorEnvelope)
    ),
    tags = ["orders"],
    operation_id = "createOrder"
)]
#[post("/orders/")]
pub async fn create_order(
    state: web::Data<HttpState>,
    body: web::Json<OrderBody>,
) -> ApiResult<HttpResponse> {
    let order = state.orders.create(body.into_inner().into()).await?;
    Ok(envelope::created("order created", order))
}

/// Fetch an order by id.
#[utoipa::path(
    get,
    path = "/orders/{id}/",
    params(("id" = i32, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "Order found", body = OrderWithOwner),
        (status = 404, description = "Order not found", body = crate::inbound::http::error::ErrorEnvelope)
    ),
    tags = ["orders"],
    operation_id = "getOrder"
)]
#[get("/orders/{id}/")]
pub async fn get_order(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let order = state.orders.get(path.into_inner()).await?;
    Ok(envelope::ok(order))
}

/// Partially update an order; absent fields stay unchanged.
#[utoipa::path(
    put,
    path = "/orders/{id}/",
    params(("id" = i32, Path, description = "Order identifier")),
    request_body = OrderBody,
    responses(
        (status = 200, description = "Order updated", body = OrderWithOwner),
        (status = 400, description = "Validation failure or unresolvable user reference", body = crate::inbound::http::error::ErrorEnvelope),
        (status = 404, description = "Order not found", body = crate::inbound::http::error::ErrorEnvelope)
    ),
    tags = ["orders"],
    operation_id = "updateOrder"
)]
#[put("/orders/{id}/")]
pub async fn update_order(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    body: web::Json<OrderBody>,
) -> ApiResult<HttpResponse> {
    let order = state
        .orders
        .update(path.into_inner(), body.into_inner().into())
        .await?;
    Ok(envelope::updated("order updated", order))
}

/// Delete an order.
#[utoipa::path(
    delete,
    path = "/orders/{id}/",
    params(("id" = i32, Path, description = "Order identifier")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, description = "Order not found", body = crate::inbound::http::error::ErrorEnvelope)
    ),
    tags = ["orders"],
    operation_id = "deleteOrder"
)]
#[delete("/orders/{id}/")]
pub async fn delete_order(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.orders.delete(path.into_inner()).await?;
    Ok(envelope::deleted("order deleted"))
}

/// List the orders owned by an existing user, newest first.
///
/// A user without orders yields an empty list; an unknown user is a 404,
/// distinct from the empty case.
#[utoipa::path(
    get,
    path = "/users/{id}/orders/",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Orders owned by the user", body = [OrderWithOwner]),
        (status = 404, description = "User not found", body = crate::inbound::http::error::ErrorEnvelope)
    ),
    tags = ["orders"],
    operation_id = "listUserOrders"
)]
#[get("/users/{id}/orders/")]
pub async fn list_user_orders(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let orders = state.orders.list_for_user(path.into_inner()).await?;
    Ok(envelope::ok(orders))
}

#[cfg(test)]
#[path = "orders_tests.rs"]
mod tests;
