//! HTTP framework for the userhub service
//!
//! Routing, request/response types with the JSON envelope, middleware,
//! configuration, a service container and test helpers.

pub mod app;
pub mod config;
pub mod container;
pub mod error;
pub mod http;
pub mod logging;
pub mod middleware;
pub mod routing;
pub mod server;
pub mod testing;

pub use app::Application;
pub use config::{AppConfig, Config, Environment, ServerConfig};
pub use container::App;
pub use error::{AppError, FrameworkError};
pub use crate::http::{success, success_message, ApiResponse, HttpResponse, Request, Response};
pub use middleware::{register_global_middleware, Middleware, MiddlewareRegistry, Next};
pub use routing::{
    route, validate_route_path, GroupDef, GroupRoute, HttpMethod, RouteDefBuilder, RouteInfo,
    Router,
};
#[doc(hidden)]
pub use routing::{__any_impl, __delete_impl, __get_impl, __post_impl, __put_impl};
pub use server::Server;

// Re-exported for handlers and middleware
pub use async_trait::async_trait;
pub use serde_json;
