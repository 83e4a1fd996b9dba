mod store;

pub use store::StoreConfig;

use kit::Config;

/// Register all application configs
pub fn register_all() {
    Config::register(StoreConfig::from_env());
}
