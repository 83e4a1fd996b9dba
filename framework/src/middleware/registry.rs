//! Global middleware registration
//!
//! Middleware registered here runs on every request, including requests that
//! end in a 404 or 405. Register it from the app's bootstrap with the
//! `global_middleware!` macro, or pass it to `Server::middleware()` directly.

use super::{into_boxed, BoxedMiddleware, Middleware};
use std::sync::{OnceLock, RwLock};

/// Populated by `global_middleware!` during bootstrap
static GLOBAL_MIDDLEWARE: OnceLock<RwLock<Vec<BoxedMiddleware>>> = OnceLock::new();

/// Register a global middleware that runs on every request
///
/// Middleware runs in registration order.
///
/// ```rust,ignore
/// global_middleware!(LoggingMiddleware);
/// ```
pub fn register_global_middleware<M: Middleware + 'static>(middleware: M) {
    let registry = GLOBAL_MIDDLEWARE.get_or_init(|| RwLock::new(Vec::new()));
    if let Ok(mut vec) = registry.write() {
        vec.push(into_boxed(middleware));
    }
}

/// Get all registered global middleware
pub fn get_global_middleware() -> Vec<BoxedMiddleware> {
    GLOBAL_MIDDLEWARE
        .get()
        .and_then(|lock| lock.read().ok())
        .map(|vec| vec.clone())
        .unwrap_or_default()
}

/// Middleware applied around every request handled by a server or test client
#[derive(Clone, Default)]
pub struct MiddlewareRegistry {
    global: Vec<BoxedMiddleware>,
}

impl MiddlewareRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with everything registered via `global_middleware!`
    pub fn from_global() -> Self {
        Self {
            global: get_global_middleware(),
        }
    }

    /// Append middleware; it runs after the ones already present
    pub fn append<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.global.push(into_boxed(middleware));
        self
    }

    pub fn global_middleware(&self) -> &[BoxedMiddleware] {
        &self.global
    }
}

/// Register global middleware from bootstrap code
#[macro_export]
macro_rules! global_middleware {
    ($middleware:expr) => {
        $crate::middleware::register_global_middleware($middleware)
    };
}
