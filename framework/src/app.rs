//! Application builder
//!
//! ```rust,ignore
//! use kit::Application;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     Application::new()
//!         .log_filter("userhub=info,userhub_kit=info")
//!         .config(config::register_all)
//!         .bootstrap(bootstrap::register)
//!         .routes(routes::register)
//!         .run()
//!         .await
//! }
//! ```

use crate::routing::RouteInfo;
use crate::{logging, AppConfig, Config, Router, Server};
use clap::{Parser, Subcommand};
use std::future::Future;
use std::path::Path;
use std::pin::Pin;

type BootstrapFn = Box<dyn FnOnce() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send>;
type RoutesFn = Box<dyn FnOnce() -> Router + Send>;

#[derive(Parser)]
#[command(about = "HTTP application server and utilities")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Run the web server (default command)
    Serve,
    /// Print the registered routes and exit
    Routes,
}

pub struct Application {
    log_filter: String,
    config_fn: Option<Box<dyn FnOnce()>>,
    bootstrap_fn: Option<BootstrapFn>,
    routes_fn: Option<RoutesFn>,
}

impl Application {
    pub fn new() -> Self {
        Application {
            log_filter: logging::DEFAULT_FILTER.to_string(),
            config_fn: None,
            bootstrap_fn: None,
            routes_fn: None,
        }
    }

    /// Log filter used when `RUST_LOG` is unset
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Register application configuration, called right after `.env` loading
    pub fn config<F>(mut self, f: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        self.config_fn = Some(Box::new(f));
        self
    }

    /// Register services and global middleware before serving
    pub fn bootstrap<F, Fut>(mut self, f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.bootstrap_fn = Some(Box::new(move || Box::pin(f())));
        self
    }

    pub fn routes<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> Router + Send + 'static,
    {
        self.routes_fn = Some(Box::new(f));
        self
    }

    /// Parse CLI arguments and run the selected command
    ///
    /// - `serve` (default): run the web server
    /// - `routes`: print the route table
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let cli = Cli::parse();

        // .env may set RUST_LOG, so it is loaded before the subscriber
        let environment = Config::init(Path::new("."));
        logging::init(&self.log_filter);

        let Application {
            log_filter: _,
            config_fn,
            bootstrap_fn,
            routes_fn,
        } = self;

        if let Some(config_fn) = config_fn {
            config_fn();
        }

        let router = routes_fn.map(|f| f()).unwrap_or_default();

        match cli.command.unwrap_or(Commands::Serve) {
            Commands::Routes => {
                print!("{}", route_table(router.routes()));
                Ok(())
            }
            Commands::Serve => {
                if let Some(bootstrap_fn) = bootstrap_fn {
                    bootstrap_fn().await;
                }

                let app = Config::get::<AppConfig>().unwrap_or_default();
                tracing::info!(%environment, app = %app.name, debug = app.debug, "starting server");
                for route in router.routes() {
                    tracing::info!(
                        method = %route.method,
                        path = %route.path,
                        "{}",
                        route.description.as_deref().unwrap_or("")
                    );
                }

                Server::from_config(router).run().await.map_err(|err| {
                    tracing::error!(error = %err, "server stopped");
                    err
                })
            }
        }
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

/// Render routes as an aligned `METHOD  PATH  DESCRIPTION` table
pub fn route_table(routes: &[RouteInfo]) -> String {
    let path_width = routes
        .iter()
        .map(|r| r.path.len())
        .max()
        .unwrap_or(0)
        .max("PATH".len());

    let mut out = format!("{:<7} {:<path_width$}  DESCRIPTION\n", "METHOD", "PATH");
    for route in routes {
        let description = route
            .description
            .as_deref()
            .or(route.name.as_deref())
            .unwrap_or("");
        out.push_str(&format!(
            "{:<7} {:<path_width$}  {}\n",
            route.method.as_str(),
            route.path,
            description
        ));
    }
    out
}
