//! Route definition macros
//!
//! ```rust,ignore
//! use kit::{routes, get, post, group};
//!
//! routes! {
//!     get!("/", controllers::home::index).name("home"),
//!     group!("/users", {
//!         get!("/", controllers::user::index).name("users.index"),
//!         post!("/", controllers::user::store).name("users.store"),
//!         get!("/{id}", controllers::user::show).name("users.show"),
//!     }),
//! }
//! ```

use crate::http::{Request, Response};
use crate::routing::router::{BoxedHandler, HttpMethod, Router};
use std::future::Future;
use std::sync::Arc;

/// Const function to validate route paths start with '/'
///
/// # Panics
///
/// Panics at compile time if the path is empty or doesn't start with '/'.
pub const fn validate_route_path(path: &'static str) -> &'static str {
    let bytes = path.as_bytes();
    if bytes.is_empty() || bytes[0] != b'/' {
        panic!("Route path must start with '/'")
    }
    path
}

/// Builder for route definitions that supports `.name()` and `.describe()` chaining
pub struct RouteDefBuilder<H> {
    methods: &'static [HttpMethod],
    path: &'static str,
    handler: H,
    name: Option<&'static str>,
    description: Option<&'static str>,
}

impl<H, Fut> RouteDefBuilder<H>
where
    H: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    pub fn new(methods: &'static [HttpMethod], path: &'static str, handler: H) -> Self {
        Self {
            methods,
            path,
            handler,
            name: None,
            description: None,
        }
    }

    /// Name this route for URL generation
    pub fn name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Short description listed by the `routes` command
    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Register this route definition with a router
    pub fn register(self, router: Router) -> Router {
        let mut router = router;
        self.into_group_route().register_under("", &mut router);
        router
    }

    /// Convert this route definition to a type-erased GroupRoute
    pub fn into_group_route(self) -> GroupRoute {
        let handler = self.handler;
        let boxed: BoxedHandler = Box::new(move |req| Box::pin(handler(req)));
        GroupRoute {
            methods: self.methods,
            path: self.path,
            handler: Arc::new(boxed),
            name: self.name,
            description: self.description,
        }
    }
}

/// Create a GET route definition with compile-time path validation
///
/// ```rust,ignore
/// get!("/users", controllers::user::index).name("users.index")
/// ```
#[macro_export]
macro_rules! get {
    ($path:expr, $handler:expr) => {{
        const _: &str = $crate::validate_route_path($path);
        $crate::__get_impl($path, $handler)
    }};
}

#[doc(hidden)]
pub fn __get_impl<H, Fut>(path: &'static str, handler: H) -> RouteDefBuilder<H>
where
    H: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    RouteDefBuilder::new(&[HttpMethod::Get], path, handler)
}

/// Create a POST route definition with compile-time path validation
#[macro_export]
macro_rules! post {
    ($path:expr, $handler:expr) => {{
        const _: &str = $crate::validate_route_path($path);
        $crate::__post_impl($path, $handler)
    }};
}

#[doc(hidden)]
pub fn __post_impl<H, Fut>(path: &'static str, handler: H) -> RouteDefBuilder<H>
where
    H: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    RouteDefBuilder::new(&[HttpMethod::Post], path, handler)
}

/// Create a PUT route definition with compile-time path validation
#[macro_export]
macro_rules! put {
    ($path:expr, $handler:expr) => {{
        const _: &str = $crate::validate_route_path($path);
        $crate::__put_impl($path, $handler)
    }};
}

#[doc(hidden)]
pub fn __put_impl<H, Fut>(path: &'static str, handler: H) -> RouteDefBuilder<H>
where
    H: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    RouteDefBuilder::new(&[HttpMethod::Put], path, handler)
}

/// Create a DELETE route definition with compile-time path validation
#[macro_export]
macro_rules! delete {
    ($path:expr, $handler:expr) => {{
        const _: &str = $crate::validate_route_path($path);
        $crate::__delete_impl($path, $handler)
    }};
}

#[doc(hidden)]
pub fn __delete_impl<H, Fut>(path: &'static str, handler: H) -> RouteDefBuilder<H>
where
    H: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    RouteDefBuilder::new(&[HttpMethod::Delete], path, handler)
}

/// Create a route answering GET, POST, PUT and DELETE with one handler
///
/// ```rust,ignore
/// any!("/", controllers::home::index).name("home")
/// ```
#[macro_export]
macro_rules! any {
    ($path:expr, $handler:expr) => {{
        const _: &str = $crate::validate_route_path($path);
        $crate::__any_impl($path, $handler)
    }};
}

#[doc(hidden)]
pub fn __any_impl<H, Fut>(path: &'static str, handler: H) -> RouteDefBuilder<H>
where
    H: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    RouteDefBuilder::new(&HttpMethod::ALL, path, handler)
}

// ============================================================================
// Route Grouping Support
// ============================================================================

/// A route stored within a group (type-erased handler)
pub struct GroupRoute {
    methods: &'static [HttpMethod],
    path: &'static str,
    handler: Arc<BoxedHandler>,
    name: Option<&'static str>,
    description: Option<&'static str>,
}

impl GroupRoute {
    /// Insert under `prefix`; a route path of "/" maps to the bare prefix
    fn register_under(self, prefix: &str, router: &mut Router) {
        let full_path = if self.path == "/" && !prefix.is_empty() {
            prefix.to_string()
        } else {
            format!("{}{}", prefix, self.path)
        };

        for method in self.methods {
            let before = router.routes().len();
            router.insert(*method, &full_path, self.handler.clone());
            if router.routes().len() == before {
                continue;
            }

            if let Some(name) = self.name {
                router.name_last(name);
            }
            if let Some(description) = self.description {
                router.describe_last(description);
            }
        }
    }
}

/// Group definition that collects routes under a shared prefix
pub struct GroupDef {
    prefix: &'static str,
    routes: Vec<GroupRoute>,
}

impl GroupDef {
    /// Use the `group!` macro instead for compile-time validation.
    #[doc(hidden)]
    pub fn __new_unchecked(prefix: &'static str) -> Self {
        Self {
            prefix,
            routes: Vec::new(),
        }
    }

    /// Add a route to this group
    pub fn route<H, Fut>(mut self, route: RouteDefBuilder<H>) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.routes.push(route.into_group_route());
        self
    }

    /// Register all routes in this group with the router
    pub fn register(self, mut router: Router) -> Router {
        for route in self.routes {
            route.register_under(self.prefix, &mut router);
        }
        router
    }
}

/// Define a route group with a shared prefix and compile-time validation
///
/// # Compile Error
///
/// Fails to compile if prefix doesn't start with '/'.
#[macro_export]
macro_rules! group {
    ($prefix:expr, { $( $route:expr ),* $(,)? }) => {{
        const _: &str = $crate::validate_route_path($prefix);
        let mut group = $crate::GroupDef::__new_unchecked($prefix);
        $(
            group = group.route($route);
        )*
        group
    }};
}

/// Define routes and generate a `pub fn register() -> Router`
///
/// Place it at the top level of your `routes.rs` file.
#[macro_export]
macro_rules! routes {
    ( $( $route:expr ),* $(,)? ) => {
        pub fn register() -> $crate::Router {
            let mut router = $crate::Router::new();
            $(
                router = $route.register(router);
            )*
            router
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::http::{HttpResponse, Request, Response};
    use crate::routing::{HttpMethod, RouteMatch};

    async fn ok(_req: Request) -> Response {
        Ok(HttpResponse::text("ok"))
    }

    mod table {
        use super::ok;

        crate::routes! {
            crate::get!("/", ok).name("macro.home"),
            crate::group!("/things", {
                crate::get!("/", ok).name("macro.things.index").describe("List things"),
                crate::get!("/{id}", ok).name("macro.things.show"),
                crate::put!("/{id}", ok),
            }),
            crate::any!("/echo", ok).describe("Echo"),
        }
    }

    #[test]
    fn test_group_prefixes_paths() {
        let router = table::register();
        let paths: Vec<(HttpMethod, &str)> = router
            .routes()
            .iter()
            .map(|r| (r.method, r.path.as_str()))
            .collect();
        assert_eq!(
            paths,
            vec![
                (HttpMethod::Get, "/"),
                (HttpMethod::Get, "/things"),
                (HttpMethod::Get, "/things/{id}"),
                (HttpMethod::Put, "/things/{id}"),
                (HttpMethod::Get, "/echo"),
                (HttpMethod::Post, "/echo"),
                (HttpMethod::Put, "/echo"),
                (HttpMethod::Delete, "/echo"),
            ]
        );
        assert_eq!(
            router.routes()[1].description.as_deref(),
            Some("List things")
        );
        assert_eq!(
            crate::route("macro.things.show", &[("id", "9")]).as_deref(),
            Some("/things/9")
        );
        assert!(matches!(
            router.match_route(&http::Method::DELETE, "/things/9"),
            RouteMatch::MethodNotAllowed { .. }
        ));
        assert!(matches!(
            router.match_route(&http::Method::DELETE, "/echo"),
            RouteMatch::Found { .. }
        ));
        assert!(router.routes()[4..]
            .iter()
            .all(|r| r.description.as_deref() == Some("Echo")));
    }
}
