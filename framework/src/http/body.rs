//! Body collection and parsing
//!
//! The server collects each body in full (bounded by
//! `ServerConfig::max_body_size`) before routing, so handlers work on bytes.

use crate::error::FrameworkError;
use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Body;
use serde::de::DeserializeOwned;

/// Collect a full body, refusing anything over `limit` bytes
pub async fn collect_body<B>(body: B, limit: usize) -> Result<Bytes, FrameworkError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    Limited::new(body, limit)
        .collect()
        .await
        .map(|collected| collected.to_bytes())
        .map_err(|e| {
            if e.downcast_ref::<LengthLimitError>().is_some() {
                FrameworkError::PayloadTooLarge { limit }
            } else {
                FrameworkError::internal(format!("Failed to read request body: {}", e))
            }
        })
}

/// Parse bytes as JSON into the target type
pub fn parse_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, FrameworkError> {
    serde_json::from_slice(bytes).map_err(|e| FrameworkError::invalid_json(e.to_string()))
}

/// Parse a query string into the target type
pub fn parse_query<T: DeserializeOwned>(query: &str) -> Result<T, FrameworkError> {
    serde_urlencoded::from_str(query)
        .map_err(|e| FrameworkError::domain(format!("Invalid query string: {}", e), 400))
}
