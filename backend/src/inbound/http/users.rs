//! User HTTP handlers.
//!
//! ```text
//! GET    /users/
//! POST   /users/        {"name":"Ada","email":"ada@example.com","age":36}
//! GET    /users/{id}/
//! PUT    /users/{id}/   partial update
//! DELETE /users/{id}/   cascades to the user's orders
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{User, UserDraft};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, envelope};

/// Request body for creating or partially updating a user.
///
/// Fields are optional so that missing required fields surface through the
/// envelope's `errors` object rather than a deserialisation failure.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UserBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i64>,
}

impl From<UserBody> for UserDraft {
    fn from(body: UserBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            age: body.age,
        }
    }
}

/// List all users, newest first.
#[utoipa::path(
    get,
    path = "/users/",
    responses(
        (status = 200, description = "Users wrapped in the success envelope", body = [User]),
        (status = 500, description = "Unexpected failure", body = crate::inbound::http::error::ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users/")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let users = state.users.list().await?;
    Ok(envelope::ok(users))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/users/",
    request_body = UserBody,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Validation failure", body = crate::inbound::http::error::ErrorEnvelope),
        (status = 500, description = "Unexpected failure", body = crate::inbound::http::error::ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users/")]
pub async fn create_user(
    state: web::Data<HttpState>,
    body: web::Json<UserBody>,
) -> ApiResult<HttpResponse> {
    let user = state.users.create(body.into_inner().into()).await?;
    Ok(envelope::created("user created", user))
}

/// Fetch a user by id.
#[utoipa::path(
    get,
    path = "/users/{id}/",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found", body = crate::inbound::http::error::ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}/")]
pub async fn get_user(state: web::Data<HttpState>, path: web::Path<i32>) -> ApiResult<HttpResponse> {
    let user = state.users.get(path.into_inner()).await?;
    Ok(envelope::ok(user))
}

/// Partially update a user; absent fields stay unchanged.
#[utoipa::path(
    put,
    path = "/users/{id}/",
    params(("id" = i32, Path, description = "User identifier")),
    request_body = UserBody,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Validation failure", body = crate::inbound::http::error::ErrorEnvelope),
        (status = 404, description = "User not found", body = crate::inbound::http::error::ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}/")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    body: web::Json<UserBody>,
) -> ApiResult<HttpResponse> {
    let user = state
        .users
        .update(path.into_inner(), body.into_inner().into())
        .await?;
    Ok(envelope::updated("user updated", user))
}

/// Delete a user and, by cascade, every order it owns.
#[utoipa::path(
    delete,
    path = "/users/{id}/",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = crate::inbound::http::error::ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}/")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.users.delete(path.into_inner()).await?;
    Ok(envelope::deleted("user deleted"))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
