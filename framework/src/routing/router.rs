use crate::http::{Request, Response};
use matchit::Router as MatchitRouter;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, OnceLock, RwLock};

/// Global registry mapping route names to path patterns
static ROUTE_REGISTRY: OnceLock<RwLock<HashMap<String, String>>> = OnceLock::new();

/// Register a route name -> path mapping
fn register_route_name(name: &str, path: &str) {
    let registry = ROUTE_REGISTRY.get_or_init(|| RwLock::new(HashMap::new()));
    if let Ok(mut map) = registry.write() {
        map.insert(name.to_string(), path.to_string());
    }
}

/// Generate a URL for a named route with parameters
///
/// Returns `None` if no route was registered under `name`.
///
/// ```rust,ignore
/// let url = route("users.show", &[("id", "3")]);
/// assert_eq!(url.as_deref(), Some("/users/3"));
/// ```
pub fn route(name: &str, params: &[(&str, &str)]) -> Option<String> {
    let registry = ROUTE_REGISTRY.get()?.read().ok()?;
    let path_pattern = registry.get(name)?;

    let mut url = path_pattern.clone();
    for (key, value) in params {
        url = url.replace(&format!("{{{}}}", key), value);
    }
    Some(url)
}

/// HTTP methods the router dispatches on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 4] = [Self::Get, Self::Post, Self::Put, Self::Delete];

    pub fn from_method(method: &http::Method) -> Option<Self> {
        match *method {
            http::Method::GET => Some(Self::Get),
            http::Method::POST => Some(Self::Post),
            http::Method::PUT => Some(Self::Put),
            http::Method::DELETE => Some(Self::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type alias for route handlers
pub type BoxedHandler =
    Box<dyn Fn(Request) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync>;

/// A registered route, as listed by `Router::routes`
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInfo {
    pub method: HttpMethod,
    pub path: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Outcome of matching a method and path
pub enum RouteMatch {
    Found {
        handler: Arc<BoxedHandler>,
        params: HashMap<String, String>,
    },
    /// The path exists but not for this method
    MethodNotAllowed { allowed: Vec<HttpMethod> },
    NotFound,
}

/// A handler stored in a method tree, with the pattern it was registered under
struct Endpoint {
    pattern: String,
    handler: Arc<BoxedHandler>,
}

/// Rank a pattern by how much it leaves to wildcards; lower is more specific
fn wildcard_rank(pattern: &str) -> (usize, usize) {
    let catch_all = pattern.matches("{*").count();
    let params = pattern.matches('{').count() - catch_all;
    (catch_all, params)
}

/// HTTP router with one matchit tree per method
///
/// A path belongs to the most specific pattern that matches it in any tree,
/// so `PUT /users/search` is a 405 when only `GET /users/search` exists,
/// even if `PUT /users/{id}` would match on its own.
pub struct Router {
    get_routes: MatchitRouter<Endpoint>,
    post_routes: MatchitRouter<Endpoint>,
    put_routes: MatchitRouter<Endpoint>,
    delete_routes: MatchitRouter<Endpoint>,
    routes: Vec<RouteInfo>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            get_routes: MatchitRouter::new(),
            post_routes: MatchitRouter::new(),
            put_routes: MatchitRouter::new(),
            delete_routes: MatchitRouter::new(),
            routes: Vec::new(),
        }
    }

    fn table(&self, method: HttpMethod) -> &MatchitRouter<Endpoint> {
        match method {
            HttpMethod::Get => &self.get_routes,
            HttpMethod::Post => &self.post_routes,
            HttpMethod::Put => &self.put_routes,
            HttpMethod::Delete => &self.delete_routes,
        }
    }

    fn table_mut(&mut self, method: HttpMethod) -> &mut MatchitRouter<Endpoint> {
        match method {
            HttpMethod::Get => &mut self.get_routes,
            HttpMethod::Post => &mut self.post_routes,
            HttpMethod::Put => &mut self.put_routes,
            HttpMethod::Delete => &mut self.delete_routes,
        }
    }

    /// Insert a pre-boxed handler (used by route definitions and groups)
    ///
    /// A path that conflicts with an existing route is skipped with a warning.
    pub(crate) fn insert(&mut self, method: HttpMethod, path: &str, handler: Arc<BoxedHandler>) {
        let endpoint = Endpoint {
            pattern: path.to_string(),
            handler,
        };
        match self.table_mut(method).insert(path, endpoint) {
            Ok(()) => self.routes.push(RouteInfo {
                method,
                path: path.to_string(),
                name: None,
                description: None,
            }),
            Err(err) => {
                tracing::warn!(%method, path, error = %err, "route not registered");
            }
        }
    }

    /// Attach a name to the most recently registered route
    pub(crate) fn name_last(&mut self, name: &str) {
        if let Some(last) = self.routes.last_mut() {
            register_route_name(name, &last.path);
            last.name = Some(name.to_string());
        }
    }

    /// Attach a description to the most recently registered route
    pub(crate) fn describe_last(&mut self, description: &str) {
        if let Some(last) = self.routes.last_mut() {
            last.description = Some(description.to_string());
        }
    }

    fn boxed<H, Fut>(handler: H) -> Arc<BoxedHandler>
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let handler: BoxedHandler = Box::new(move |req| Box::pin(handler(req)));
        Arc::new(handler)
    }

    fn add<H, Fut>(mut self, method: HttpMethod, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.insert(method, path, Self::boxed(handler));
        RouteBuilder { router: self }
    }

    /// Register a GET route
    pub fn get<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.add(HttpMethod::Get, path, handler)
    }

    /// Register a POST route
    pub fn post<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.add(HttpMethod::Post, path, handler)
    }

    /// Register a PUT route
    pub fn put<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.add(HttpMethod::Put, path, handler)
    }

    /// Register a DELETE route
    pub fn delete<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.add(HttpMethod::Delete, path, handler)
    }

    /// Every registered route, in registration order
    pub fn routes(&self) -> &[RouteInfo] {
        &self.routes
    }

    /// Per-method matches for `path`, keeping only the most specific pattern
    fn owners(&self, path: &str) -> Vec<(HttpMethod, &Endpoint, HashMap<String, String>)> {
        let matches: Vec<_> = HttpMethod::ALL
            .into_iter()
            .filter_map(|method| {
                let matched = self.table(method).at(path).ok()?;
                let params = matched
                    .params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                Some((method, matched.value, params))
            })
            .collect();

        let Some(best) = matches
            .iter()
            .map(|(_, endpoint, _)| wildcard_rank(&endpoint.pattern))
            .min()
        else {
            return Vec::new();
        };

        matches
            .into_iter()
            .filter(|(_, endpoint, _)| wildcard_rank(&endpoint.pattern) == best)
            .collect()
    }

    /// Methods that have a route owning `path`
    pub fn allowed_methods(&self, path: &str) -> Vec<HttpMethod> {
        self.owners(path)
            .into_iter()
            .map(|(method, _, _)| method)
            .collect()
    }

    /// Match a request and return the handler with extracted params
    pub fn match_route(&self, method: &http::Method, path: &str) -> RouteMatch {
        let owners = self.owners(path);
        if owners.is_empty() {
            return RouteMatch::NotFound;
        }

        let requested = HttpMethod::from_method(method);
        let mut allowed = Vec::with_capacity(owners.len());
        for (owner, endpoint, params) in owners {
            if Some(owner) == requested {
                return RouteMatch::Found {
                    handler: endpoint.handler.clone(),
                    params,
                };
            }
            allowed.push(owner);
        }

        RouteMatch::MethodNotAllowed { allowed }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder returned after registering a route, enabling `.name()` chaining
pub struct RouteBuilder {
    pub(crate) router: Router,
}

impl RouteBuilder {
    /// Name the most recently registered route
    pub fn name(mut self, name: &str) -> Self {
        self.router.name_last(name);
        self
    }

    /// Describe the most recently registered route (shown by the `routes` command)
    pub fn describe(mut self, description: &str) -> Self {
        self.router.describe_last(description);
        self
    }

    /// Register a GET route
    pub fn get<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.router.get(path, handler)
    }

    /// Register a POST route
    pub fn post<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.router.post(path, handler)
    }

    /// Register a PUT route
    pub fn put<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.router.put(path, handler)
    }

    /// Register a DELETE route
    pub fn delete<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.router.delete(path, handler)
    }
}

impl From<RouteBuilder> for Router {
    fn from(builder: RouteBuilder) -> Self {
        builder.router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;

    async fn ok(_req: Request) -> Response {
        Ok(HttpResponse::text("ok"))
    }

    fn router() -> Router {
        Router::new()
            .get("/users", ok)
            .name("test.users.index")
            .post("/users", ok)
            .get("/users/search", ok)
            .get("/users/{id}", ok)
            .name("test.users.show")
            .describe("Get user by ID")
            .delete("/users/{id}", ok)
            .into()
    }

    #[test]
    fn test_match_extracts_params() {
        let router = router();
        match router.match_route(&http::Method::GET, "/users/7") {
            RouteMatch::Found { params, .. } => {
                assert_eq!(params.get("id").map(String::as_str), Some("7"));
            }
            _ => panic!("expected a match"),
        }
    }

    #[test]
    fn test_static_segment_wins_over_param() {
        let router = router();
        match router.match_route(&http::Method::GET, "/users/search") {
            RouteMatch::Found { params, .. } => assert!(params.is_empty()),
            _ => panic!("expected a match"),
        }
    }

    #[test]
    fn test_method_not_allowed_lists_methods() {
        let router = router();
        match router.match_route(&http::Method::PATCH, "/users/7") {
            RouteMatch::MethodNotAllowed { allowed } => {
                assert_eq!(allowed, vec![HttpMethod::Get, HttpMethod::Delete]);
            }
            _ => panic!("expected 405"),
        }
        assert!(matches!(
            router.match_route(&http::Method::PUT, "/users"),
            RouteMatch::MethodNotAllowed { .. }
        ));
    }

    #[test]
    fn test_static_segment_owns_path_for_every_method() {
        let router = router();
        for method in [http::Method::PUT, http::Method::DELETE, http::Method::PATCH] {
            match router.match_route(&method, "/users/search") {
                RouteMatch::MethodNotAllowed { allowed } => {
                    assert_eq!(allowed, vec![HttpMethod::Get]);
                }
                _ => panic!("expected 405 for {}", method),
            }
        }
        assert!(matches!(
            router.match_route(&http::Method::DELETE, "/users/7"),
            RouteMatch::Found { .. }
        ));
    }

    #[test]
    fn test_catch_all_ranks_below_params() {
        let router: Router = Router::new()
            .get("/files/{name}", ok)
            .put("/files/{name}/{*rest}", ok)
            .into();

        assert_eq!(router.allowed_methods("/files/a"), vec![HttpMethod::Get]);
        match router.match_route(&http::Method::PUT, "/files/a/b/c") {
            RouteMatch::Found { params, .. } => {
                assert_eq!(params.get("rest").map(String::as_str), Some("b/c"));
            }
            _ => panic!("expected a match"),
        }
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        let router = router();
        assert!(matches!(
            router.match_route(&http::Method::GET, "/nope"),
            RouteMatch::NotFound
        ));
        assert!(matches!(
            router.match_route(&http::Method::GET, "/users/7/extra"),
            RouteMatch::NotFound
        ));
    }

    #[test]
    fn test_route_names_and_listing() {
        let router = router();
        assert_eq!(route("test.users.show", &[("id", "3")]).as_deref(), Some("/users/3"));
        assert_eq!(route("test.missing", &[]), None);

        let show = &router.routes()[3];
        assert_eq!(show.method, HttpMethod::Get);
        assert_eq!(show.path, "/users/{id}");
        assert_eq!(show.name.as_deref(), Some("test.users.show"));
        assert_eq!(show.description.as_deref(), Some("Get user by ID"));
        assert_eq!(router.routes().len(), 5);
    }
}
