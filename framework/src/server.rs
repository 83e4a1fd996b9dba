use crate::config::{Config, ServerConfig};
use crate::container::App;
use crate::error::AppError;
use crate::http::{collect_body, HttpResponse, Request};
use crate::middleware::{MiddlewareChain, MiddlewareRegistry};
use crate::routing::{BoxedHandler, RouteMatch, Router};
use bytes::Bytes;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct Server {
    router: Arc<Router>,
    middleware: MiddlewareRegistry,
    config: ServerConfig,
}

impl Server {
    /// Build a server from the registered `ServerConfig` and global middleware
    pub fn from_config(router: impl Into<Router>) -> Self {
        App::init();

        let config = Config::get::<ServerConfig>().unwrap_or_else(ServerConfig::from_env);
        Self {
            router: Arc::new(router.into()),
            // Pull global middleware registered via global_middleware! in bootstrap
            middleware: MiddlewareRegistry::from_global(),
            config,
        }
    }

    /// Bind the configured address and serve until the process exits
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.config.socket_addr()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!(%addr, "server running on http://{}", addr);

        self.serve(listener).await
    }

    /// Serve connections from an already bound listener
    pub async fn serve(
        self,
        listener: TcpListener,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let router = self.router;
        let middleware = Arc::new(self.middleware);
        let limit = self.config.max_body_size;

        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to accept connection");
                    continue;
                }
            };
            let io = TokioIo::new(stream);
            let router = router.clone();
            let middleware = middleware.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req: hyper::Request<hyper::body::Incoming>| {
                    let router = router.clone();
                    let middleware = middleware.clone();
                    async move {
                        Ok::<_, Infallible>(handle_request(router, middleware, limit, req).await)
                    }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    tracing::warn!(%peer, error = %err, "error serving connection");
                }
            });
        }
    }
}

async fn handle_request(
    router: Arc<Router>,
    middleware: Arc<MiddlewareRegistry>,
    limit: usize,
    req: hyper::Request<hyper::body::Incoming>,
) -> hyper::Response<Full<Bytes>> {
    serve_request(&router, &middleware, limit, req)
        .await
        .into_hyper()
}

/// Collect the body (at most `limit` bytes) and dispatch
///
/// An oversized body is answered with a 413 envelope, still through the
/// global middleware so the rejection is logged.
pub async fn serve_request<B>(
    router: &Router,
    middleware: &MiddlewareRegistry,
    limit: usize,
    req: http::Request<B>,
) -> HttpResponse
where
    B: hyper::body::Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let (parts, body) = req.into_parts();

    match collect_body(body, limit).await {
        Ok(bytes) => dispatch(router, middleware, http::Request::from_parts(parts, bytes)).await,
        Err(err) => {
            let request = Request::new(http::Request::from_parts(parts, Bytes::new()));
            run_chain(middleware, request, fallback(err.into())).await
        }
    }
}

/// Route a request with a collected body through global middleware
///
/// Unmatched paths produce a 404 envelope and known paths with the wrong
/// method a 405 envelope; both still pass through the middleware chain.
pub async fn dispatch(
    router: &Router,
    middleware: &MiddlewareRegistry,
    req: http::Request<Bytes>,
) -> HttpResponse {
    let (handler, params) = match router.match_route(req.method(), req.uri().path()) {
        RouteMatch::Found { handler, params } => (handler, params),
        RouteMatch::MethodNotAllowed { allowed } => {
            let allow = allowed
                .iter()
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let response = HttpResponse::from(AppError::method_not_allowed("Method not allowed"))
                .header("Allow", allow);
            (fallback(response), HashMap::new())
        }
        RouteMatch::NotFound => {
            let response = HttpResponse::from(AppError::not_found("Endpoint not found"));
            (fallback(response), HashMap::new())
        }
    };

    run_chain(middleware, Request::new(req).with_params(params), handler).await
}

async fn run_chain(
    middleware: &MiddlewareRegistry,
    request: Request,
    handler: Arc<BoxedHandler>,
) -> HttpResponse {
    let mut chain = MiddlewareChain::new();
    chain.extend(middleware.global_middleware().iter().cloned());

    // Both Ok and Err carry a finished response
    chain.execute(request, handler).await.unwrap_or_else(|e| e)
}

/// A handler that always answers with `response`
fn fallback(response: HttpResponse) -> Arc<BoxedHandler> {
    let handler: BoxedHandler = Box::new(move |_req| {
        let response = response.clone();
        Box::pin(async move { Err(response) })
    });
    Arc::new(handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Response;

    async fn hello(req: Request) -> Response {
        Ok(HttpResponse::text(format!("hello {}", req.param("name")?)))
    }

    fn request(method: &str, uri: &str) -> http::Request<Bytes> {
        http::Request::builder()
            .method(method)
            .uri(uri)
            .body(Bytes::new())
            .unwrap()
    }

    #[tokio::test]
    async fn test_dispatch_found_not_found_and_405() {
        let router: Router = Router::new().get("/hello/{name}", hello).into();
        let middleware = MiddlewareRegistry::new();

        let response = dispatch(&router, &middleware, request("GET", "/hello/kit")).await;
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.body(), "hello kit");

        let response = dispatch(&router, &middleware, request("GET", "/nope")).await;
        assert_eq!(response.status_code(), 404);
        assert!(response.body().contains("Endpoint not found"));

        let response = dispatch(&router, &middleware, request("POST", "/hello/kit")).await;
        assert_eq!(response.status_code(), 405);
        assert_eq!(response.header_value("allow"), Some("GET"));
        assert!(response.body().contains("Method not allowed"));
    }
}
