use kit::{async_trait, Middleware, Next, Request, Response};
use std::time::Instant;

/// Logs every request when it starts and when it completes
pub struct LoggingMiddleware;

#[async_trait]
impl Middleware for LoggingMiddleware {
    async fn handle(&self, request: Request, next: Next) -> Response {
        let method = request.method().clone();
        let path = request.path().to_string();
        let started = Instant::now();

        tracing::info!(%method, %path, "{} {} - Started", method, path);

        let response = next.run(request).await;

        let elapsed = started.elapsed();
        let status = match &response {
            Ok(r) | Err(r) => r.status_code(),
        };
        tracing::info!(
            %method,
            %path,
            status,
            ?elapsed,
            "{} {} - Completed in {:?}",
            method,
            path,
            elapsed
        );

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kit::testing::TestClient;
    use kit::{HttpResponse, Router};

    async fn teapot(_req: Request) -> Response {
        Err(HttpResponse::text("short and stout").status(418))
    }

    #[tokio::test]
    async fn test_logging_leaves_response_untouched() {
        let router: Router = Router::new().get("/tea", teapot).into();
        let client = TestClient::new(router).middleware(LoggingMiddleware);

        let response = client.get("/tea").send().await;
        assert_eq!(response.status(), 418);
        assert_eq!(response.text(), "short and stout");
    }
}
