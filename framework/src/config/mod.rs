//! Configuration loading and typed config access
//!
//! `.env` files are loaded with environment-based precedence, then typed config
//! structs are registered in a global repository keyed by type.
//!
//! ```rust,ignore
//! use kit::{Config, ServerConfig};
//!
//! Config::init(std::path::Path::new("."));
//! let server = Config::get::<ServerConfig>().unwrap_or_default();
//! tracing::info!(port = server.port, "configured");
//! ```

pub mod env;
pub mod providers;
pub mod repository;

pub use env::{env, env_optional, load_dotenv, Environment};
pub use providers::{AppConfig, AppConfigBuilder, ServerConfig, ServerConfigBuilder};

use std::any::Any;
use std::path::Path;

/// Facade over the config repository
pub struct Config;

impl Config {
    /// Load `.env` files from `project_root` and register the framework configs
    ///
    /// Returns the detected environment.
    pub fn init(project_root: &Path) -> Environment {
        let env = env::load_dotenv(project_root);

        repository::register(AppConfig::from_env());
        repository::register(ServerConfig::from_env());

        env
    }

    /// Get a typed config struct from the repository
    pub fn get<T: Any + Send + Sync + Clone + 'static>() -> Option<T> {
        repository::get::<T>()
    }

    /// Register a custom config struct
    ///
    /// ```rust,ignore
    /// #[derive(Clone)]
    /// struct StoreConfig { seed: bool }
    ///
    /// Config::register(StoreConfig { seed: env("USERS_SEED", true) });
    /// ```
    pub fn register<T: Any + Send + Sync + 'static>(config: T) {
        repository::register(config);
    }
}
