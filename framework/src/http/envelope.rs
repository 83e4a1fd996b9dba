//! The uniform JSON wrapper returned by every endpoint
//!
//! ```json
//! { "success": true, "message": "User retrieved successfully", "data": { ... } }
//! ```
//!
//! `data` is left out entirely when there is nothing to send.

use super::response::HttpResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T = Value> {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful envelope carrying `data`
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Serialize into an `application/json` response with the given status
    pub fn into_http(self, status: u16) -> HttpResponse {
        match serde_json::to_value(&self) {
            Ok(body) => HttpResponse::json(body).status(status),
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize response envelope");
                HttpResponse::json(serde_json::json!({
                    "success": false,
                    "message": "Internal server error",
                }))
                .status(500)
            }
        }
    }
}

impl ApiResponse<Value> {
    /// Successful envelope without data
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    /// Failed envelope without data
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_data_is_omitted_when_absent() {
        let response = ApiResponse::<Value>::message("User deleted successfully").into_http(200);
        let body: Value = serde_json::from_str(response.body()).unwrap();
        assert_eq!(
            body,
            json!({"success": true, "message": "User deleted successfully"})
        );
    }

    #[test]
    fn test_data_is_serialized() {
        let response = ApiResponse::ok("Found 0 users", Vec::<u8>::new()).into_http(200);
        let body: Value = serde_json::from_str(response.body()).unwrap();
        assert_eq!(body["data"], json!([]));
        assert_eq!(body["success"], json!(true));
    }
}
