mod body;
mod envelope;
mod request;
mod response;

pub use body::{collect_body, parse_json, parse_query};
pub use envelope::ApiResponse;
pub use request::Request;
pub use response::{HttpResponse, Response};

pub use ::http::Method;

use serde::Serialize;

/// 200 envelope with a message and data
pub fn success<T: Serialize>(message: impl Into<String>, data: T) -> Response {
    Ok(ApiResponse::ok(message, data).into_http(200))
}

/// 200 envelope with only a message
pub fn success_message(message: impl Into<String>) -> Response {
    Ok(ApiResponse::<serde_json::Value>::message(message).into_http(200))
}
