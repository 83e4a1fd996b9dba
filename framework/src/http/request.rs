use super::body::{parse_json, parse_query};
use crate::error::FrameworkError;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::str::FromStr;

/// HTTP request with its body already collected and route parameters attached
pub struct Request {
    inner: http::Request<Bytes>,
    params: HashMap<String, String>,
}

impl Request {
    pub fn new(inner: http::Request<Bytes>) -> Self {
        Self {
            inner,
            params: HashMap::new(),
        }
    }

    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    /// Get the request method
    pub fn method(&self) -> &http::Method {
        self.inner.method()
    }

    /// Get the request path
    pub fn path(&self) -> &str {
        self.inner.uri().path()
    }

    /// Raw query string, without the leading `?`
    pub fn query_string(&self) -> Option<&str> {
        self.inner.uri().query()
    }

    /// Deserialize the query string into `T`
    ///
    /// A request without a query string deserializes from an empty string, so
    /// structs with optional fields still succeed.
    pub fn query<T: DeserializeOwned>(&self) -> Result<T, FrameworkError> {
        parse_query(self.query_string().unwrap_or(""))
    }

    /// Get a single decoded query parameter
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.query::<HashMap<String, String>>()
            .ok()
            .and_then(|mut query| query.remove(name))
    }

    /// Get a route parameter by name (e.g., /users/{id})
    pub fn param(&self, name: &str) -> Result<&str, FrameworkError> {
        self.params
            .get(name)
            .map(|s| s.as_str())
            .ok_or_else(|| FrameworkError::param(name))
    }

    /// Get a route parameter parsed into `T`
    ///
    /// Returns `FrameworkError::ParamParse` (400) when the value does not parse.
    pub fn param_as<T: FromStr>(&self, name: &str) -> Result<T, FrameworkError> {
        let raw = self.param(name)?;
        raw.parse::<T>()
            .map_err(|_| FrameworkError::param_parse(raw, std::any::type_name::<T>()))
    }

    /// The collected request body
    pub fn body(&self) -> &Bytes {
        self.inner.body()
    }

    /// Parse the request body as JSON
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// #[derive(Deserialize)]
    /// struct CreateUser { name: String, email: String }
    ///
    /// pub async fn store(req: Request) -> Response {
    ///     let data: CreateUser = req.json()?;
    ///     // ...
    /// }
    /// ```
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FrameworkError> {
        parse_json(self.body())
    }
}
