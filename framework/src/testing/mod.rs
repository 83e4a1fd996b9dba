//! Testing utilities
//!
//! - [`TestClient`] drives a `Router` plus global middleware in-process, with
//!   no socket involved.
//! - [`TestContainer`] swaps container bindings for the current thread.
//! - `expect!` gives fluent assertions with expected/received output.
//!
//! ```rust,ignore
//! use kit::expect;
//! use kit::testing::{TestClient, TestContainer};
//!
//! #[tokio::test]
//! async fn lists_users() {
//!     let _guard = TestContainer::fake();
//!     TestContainer::bind::<dyn UserStore>(Arc::new(InMemoryUserStore::seeded()));
//!
//!     let response = TestClient::new(routes::register()).get("/users").send().await;
//!     expect!(response).to_have_status(200);
//! }
//! ```

mod expect;

pub use crate::container::testing::{TestContainer, TestContainerGuard};
pub use expect::Expect;

use crate::config::providers::DEFAULT_MAX_BODY_SIZE;
use crate::error::FrameworkError;
use crate::http::HttpResponse;
use crate::middleware::{Middleware, MiddlewareRegistry};
use crate::routing::Router;
use crate::server::serve_request;
use bytes::Bytes;
use http_body_util::Full;
use serde_json::Value;

/// In-process client for a router
pub struct TestClient {
    router: Router,
    middleware: MiddlewareRegistry,
    max_body_size: usize,
}

impl TestClient {
    pub fn new(router: impl Into<Router>) -> Self {
        Self {
            router: router.into(),
            middleware: MiddlewareRegistry::new(),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }

    /// Add global middleware, as `Server::middleware` does
    pub fn middleware<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.middleware = self.middleware.append(middleware);
        self
    }

    /// Body size limit applied before dispatch
    pub fn max_body_size(mut self, limit: usize) -> Self {
        self.max_body_size = limit;
        self
    }

    pub fn get(&self, uri: &str) -> TestRequest<'_> {
        self.request(http::Method::GET, uri)
    }

    pub fn post(&self, uri: &str) -> TestRequest<'_> {
        self.request(http::Method::POST, uri)
    }

    pub fn put(&self, uri: &str) -> TestRequest<'_> {
        self.request(http::Method::PUT, uri)
    }

    pub fn delete(&self, uri: &str) -> TestRequest<'_> {
        self.request(http::Method::DELETE, uri)
    }

    pub fn request(&self, method: http::Method, uri: &str) -> TestRequest<'_> {
        TestRequest {
            client: self,
            builder: http::Request::builder().method(method).uri(uri),
            body: Bytes::new(),
        }
    }
}

/// A request being built by [`TestClient`]
pub struct TestRequest<'a> {
    client: &'a TestClient,
    builder: http::request::Builder,
    body: Bytes,
}

impl TestRequest<'_> {
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    /// Send `value` as a JSON body
    pub fn json(self, value: Value) -> Self {
        self.header("content-type", "application/json")
            .body(value.to_string())
    }

    /// Send a raw body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub async fn send(self) -> TestResponse {
        let client = self.client;
        let response = match self.builder.body(Full::new(self.body)) {
            Ok(request) => {
                serve_request(&client.router, &client.middleware, client.max_body_size, request)
                    .await
            }
            Err(err) => FrameworkError::internal(format!("invalid test request: {}", err)).into(),
        };
        TestResponse::from(response)
    }
}

/// Response captured by [`TestClient`]
#[derive(Debug, Clone)]
pub struct TestResponse {
    inner: HttpResponse,
    json: Value,
}

impl From<HttpResponse> for TestResponse {
    fn from(inner: HttpResponse) -> Self {
        let json = serde_json::from_str(inner.body()).unwrap_or(Value::Null);
        Self { inner, json }
    }
}

impl TestResponse {
    pub fn status(&self) -> u16 {
        self.inner.status_code()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.header_value(name)
    }

    pub fn text(&self) -> &str {
        self.inner.body()
    }

    /// Parsed body, or `Value::Null` if it was not JSON
    pub fn json(&self) -> &Value {
        &self.json
    }

    /// Envelope `success` flag
    pub fn success(&self) -> Option<bool> {
        self.json.get("success").and_then(Value::as_bool)
    }

    /// Envelope `message`
    pub fn message(&self) -> Option<&str> {
        self.json.get("message").and_then(Value::as_str)
    }

    /// Envelope `data`, if present
    pub fn data(&self) -> Option<&Value> {
        self.json.get("data")
    }
}

/// Fluent assertion with call-site location
///
/// ```rust,ignore
/// expect!(users.len()).to_equal(2);
/// expect!(response).to_have_status(404);
/// ```
#[macro_export]
macro_rules! expect {
    ($value:expr) => {
        $crate::testing::Expect::new($value, concat!(file!(), ":", line!()))
    };
}
