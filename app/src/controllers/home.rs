use kit::{success, AppConfig, Config, Request, Response, ServerConfig};

/// `GET /`
pub async fn index(_req: Request) -> Response {
    let app = Config::get::<AppConfig>().unwrap_or_default();
    let port = Config::get::<ServerConfig>().unwrap_or_default().port;

    success(
        format!("Welcome to {} REST API", app.name),
        format!("Server is running on port {}", port),
    )
}
