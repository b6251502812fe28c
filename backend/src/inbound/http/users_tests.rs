//! Tests for user HTTP handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use serde_json::{Value, json};

use crate::inbound::http::test_utils::{in_memory_state, test_app};

async fn create_user(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    body: Value,
) -> (StatusCode, Value) {
    let request = actix_test::TestRequest::post()
        .uri("/users/")
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    (status, actix_test::read_body_json(response).await)
}

fn ada() -> Value {
    json!({ "name": "Ada", "email": "ada@example.com", "age": 36 })
}

#[actix_web::test]
async fn list_users_starts_empty() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let request = actix_test::TestRequest::get().uri("/users/").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({ "status": "success", "data": [] }));
}

#[actix_web::test]
async fn create_user_returns_201_with_the_envelope() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let (status, body) = create_user(&app, ada()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "user created");
    assert_eq!(body["data"]["name"], "Ada");
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert_eq!(body["data"]["age"], 36);
    assert_eq!(body["data"]["created_at"], body["data"]["updated_at"]);
}

#[actix_web::test]
async fn create_user_rejects_duplicate_email() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    create_user(&app, ada()).await;

    let (status, body) = create_user(
        &app,
        json!({ "name": "Other", "email": "ada@example.com", "age": 40 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "validation failed");
    assert_eq!(
        body["errors"]["email"],
        json!(["a user with this email already exists"])
    );
}

#[actix_web::test]
async fn create_user_aggregates_field_errors() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let (status, body) = create_user(&app, json!({ "email": "nope", "age": 151 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["name"], json!(["name is required"]));
    assert_eq!(
        body["errors"]["email"],
        json!(["email must be a valid email address"])
    );
    assert_eq!(body["errors"]["age"], json!(["age must be at most 150"]));
}

#[actix_web::test]
async fn create_user_rejects_an_overlong_email() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    // Syntactically valid but wider than the 254-character column.
    let email = format!("{}@example.com", "a".repeat(250));
    let (status, body) = create_user(
        &app,
        json!({ "name": "Ada", "email": email, "age": 36 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(
        body["errors"]["email"],
        json!(["email must be at most 254 characters"])
    );
}

#[actix_web::test]
async fn get_user_round_trips() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let (_, created) = create_user(&app, ada()).await;
    let id = created["data"]["id"].as_i64().expect("created id");

    let request = actix_test::TestRequest::get()
        .uri(&format!("/users/{id}/"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["data"], created["data"]);
}

#[actix_web::test]
async fn get_missing_user_is_404() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let request = actix_test::TestRequest::get()
        .uri("/users/99999/")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({ "status": "error", "message": "user not found" }));
}

#[actix_web::test]
async fn partial_update_keeps_unmentioned_fields() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let (_, created) = create_user(&app, ada()).await;
    let id = created["data"]["id"].as_i64().expect("created id");

    let request = actix_test::TestRequest::put()
        .uri(&format!("/users/{id}/"))
        .set_json(json!({ "age": 37 }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "user updated");
    assert_eq!(body["data"]["name"], "Ada");
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert_eq!(body["data"]["age"], 37);
}

#[actix_web::test]
async fn delete_user_returns_204_then_404() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let (_, created) = create_user(&app, ada()).await;
    let id = created["data"]["id"].as_i64().expect("created id");

    let request = actix_test::TestRequest::delete()
        .uri(&format!("/users/{id}/"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({ "status": "success", "message": "user deleted" }));

    let request = actix_test::TestRequest::get()
        .uri(&format!("/users/{id}/"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn malformed_json_body_uses_the_error_envelope() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let request = actix_test::TestRequest::post()
        .uri("/users/")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "error");
    assert!(
        body["message"]
            .as_str()
            .expect("message string")
            .starts_with("invalid request body")
    );
}

#[actix_web::test]
async fn non_numeric_id_behaves_like_missing_resource() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let request = actix_test::TestRequest::get()
        .uri("/users/abc/")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
