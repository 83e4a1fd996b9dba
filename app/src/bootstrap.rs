//! Application bootstrap
//!
//! Registers global middleware and services before the server starts.

use kit::{bind, global_middleware, Config};

use crate::config::StoreConfig;
use crate::middleware;
use crate::store::{InMemoryUserStore, UserStore};

/// Register global middleware and services
pub async fn register() {
    // Global middleware (runs on every request in registration order)
    global_middleware!(middleware::LoggingMiddleware);

    let config = Config::get::<StoreConfig>().unwrap_or_default();
    if config.seed {
        bind!(dyn UserStore, InMemoryUserStore::seeded());
    } else {
        bind!(dyn UserStore, InMemoryUserStore::new());
    }
    tracing::debug!(seed = config.seed, "user store registered");
}
