use kit::config::env;

/// User store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Start with the two demo users (`USERS_SEED`, default true)
    pub seed: bool,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self {
            seed: env("USERS_SEED", true),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
