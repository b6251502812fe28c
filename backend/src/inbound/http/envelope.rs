//! Uniform response envelope.
//!
//! Every response carries `{status, data?, message?, errors?}`. Success
//! variants are built here; the error variant is rendered by the
//! [`ResponseError`](actix_web::ResponseError) impl in
//! [`error`](crate::inbound::http::error).

use actix_web::HttpResponse;
use serde::Serialize;

#[derive(Serialize)]
struct SuccessEnvelope<T: Serialize> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

fn success<T: Serialize>(message: Option<&'static str>, data: Option<T>) -> SuccessEnvelope<T> {
    SuccessEnvelope {
        status: "success",
        message,
        data,
    }
}

/// 200 with a data payload, for reads and listings.
pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(success(None, Some(data)))
}

/// 201 with a message and the created entity.
pub fn created<T: Serialize>(message: &'static str, data: T) -> HttpResponse {
    HttpResponse::Created().json(success(Some(message), Some(data)))
}

/// 200 with a message and the merged entity, for updates.
pub fn updated<T: Serialize>(message: &'static str, data: T) -> HttpResponse {
    HttpResponse::Ok().json(success(Some(message), Some(data)))
}

/// 204 carrying the envelope with a message, matching the original service.
pub fn deleted(message: &'static str) -> HttpResponse {
    HttpResponse::NoContent().json(success::<()>(Some(message), None))
}
