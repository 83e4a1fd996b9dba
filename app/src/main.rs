use kit::Application;
use userhub::{bootstrap, config, routes};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    Application::new()
        .log_filter("userhub=info,userhub_kit=info")
        .config(config::register_all)
        .bootstrap(bootstrap::register)
        .routes(routes::register)
        .run()
        .await
}
