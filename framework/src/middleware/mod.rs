//! Middleware for wrapping request handling
//!
//! A middleware receives the request and a [`Next`] handle. Calling
//! `next.run(request)` passes control down the chain and finally to the route
//! handler; anything after that call runs on the way back out.
//!
//! ```rust,ignore
//! use kit::{async_trait, Middleware, Next, Request, Response};
//!
//! pub struct TimingMiddleware;
//!
//! #[async_trait]
//! impl Middleware for TimingMiddleware {
//!     async fn handle(&self, request: Request, next: Next) -> Response {
//!         let started = std::time::Instant::now();
//!         let response = next.run(request).await;
//!         tracing::info!(elapsed = ?started.elapsed(), "done");
//!         response
//!     }
//! }
//! ```

mod registry;

pub use registry::{get_global_middleware, register_global_middleware, MiddlewareRegistry};

use crate::http::{Request, Response};
use crate::routing::BoxedHandler;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait Middleware: Send + Sync {
    async fn handle(&self, request: Request, next: Next) -> Response;
}

/// Shared, type-erased middleware
pub type BoxedMiddleware = Arc<dyn Middleware>;

pub fn into_boxed<M: Middleware + 'static>(middleware: M) -> BoxedMiddleware {
    Arc::new(middleware)
}

/// The rest of the chain after the current middleware
pub struct Next {
    chain: Arc<Vec<BoxedMiddleware>>,
    index: usize,
    handler: Arc<BoxedHandler>,
}

impl Next {
    /// Run the remaining middleware and then the handler
    pub async fn run(self, request: Request) -> Response {
        let current = self.chain.get(self.index).cloned();
        match current {
            Some(middleware) => {
                let next = Next {
                    chain: self.chain,
                    index: self.index + 1,
                    handler: self.handler,
                };
                middleware.handle(request, next).await
            }
            None => (*self.handler)(request).await,
        }
    }
}

/// Ordered list of middleware to run around a single handler
#[derive(Default)]
pub struct MiddlewareChain {
    middleware: Vec<BoxedMiddleware>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, middleware: BoxedMiddleware) {
        self.middleware.push(middleware);
    }

    pub fn extend(&mut self, middleware: impl IntoIterator<Item = BoxedMiddleware>) {
        self.middleware.extend(middleware);
    }

    pub fn len(&self) -> usize {
        self.middleware.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middleware.is_empty()
    }

    /// Run the chain in registration order, ending with `handler`
    pub async fn execute(self, request: Request, handler: Arc<BoxedHandler>) -> Response {
        Next {
            chain: Arc::new(self.middleware),
            index: 0,
            handler,
        }
        .run(request)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use bytes::Bytes;
    use std::sync::Mutex;

    struct Recorder {
        label: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Middleware for Recorder {
        async fn handle(&self, request: Request, next: Next) -> Response {
            self.log.lock().unwrap().push(format!("{} in", self.label));
            let response = next.run(request).await;
            self.log.lock().unwrap().push(format!("{} out", self.label));
            response
        }
    }

    struct ShortCircuit;

    #[async_trait]
    impl Middleware for ShortCircuit {
        async fn handle(&self, _request: Request, _next: Next) -> Response {
            Err(HttpResponse::text("stopped").status(418))
        }
    }

    fn request() -> Request {
        Request::new(http::Request::builder().uri("/").body(Bytes::new()).unwrap())
    }

    fn handler(log: Arc<Mutex<Vec<String>>>) -> Arc<BoxedHandler> {
        let handler: BoxedHandler = Box::new(move |_req| {
            let log = log.clone();
            Box::pin(async move {
                log.lock().unwrap().push("handler".to_string());
                Ok(HttpResponse::text("done"))
            })
        });
        Arc::new(handler)
    }

    #[tokio::test]
    async fn test_chain_runs_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut chain = MiddlewareChain::new();
        chain.push(into_boxed(Recorder { label: "outer", log: log.clone() }));
        chain.push(into_boxed(Recorder { label: "inner", log: log.clone() }));
        assert_eq!(chain.len(), 2);

        let response = chain.execute(request(), handler(log.clone())).await;
        assert!(response.is_ok());
        assert_eq!(
            *log.lock().unwrap(),
            vec!["outer in", "inner in", "handler", "inner out", "outer out"]
        );
    }

    #[tokio::test]
    async fn test_middleware_can_short_circuit() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut chain = MiddlewareChain::new();
        chain.push(into_boxed(ShortCircuit));

        let response = chain.execute(request(), handler(log.clone())).await;
        assert_eq!(response.unwrap_err().status_code(), 418);
        assert!(log.lock().unwrap().is_empty());
    }
}
