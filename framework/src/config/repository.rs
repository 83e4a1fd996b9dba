use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

/// Global config repository - stores config instances by type
static CONFIG_REPOSITORY: OnceLock<RwLock<ConfigRepository>> = OnceLock::new();

/// Repository for storing typed configuration structs
#[derive(Default)]
pub struct ConfigRepository {
    configs: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl ConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a config struct, replacing any earlier one of the same type
    pub fn register<T: Any + Send + Sync + 'static>(&mut self, config: T) {
        self.configs.insert(TypeId::of::<T>(), Box::new(config));
    }

    pub fn get<T: Any + Send + Sync + Clone + 'static>(&self) -> Option<T> {
        self.configs
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .cloned()
    }
}

fn repository() -> &'static RwLock<ConfigRepository> {
    CONFIG_REPOSITORY.get_or_init(|| RwLock::new(ConfigRepository::new()))
}

/// Register a config in the global repository
pub fn register<T: Any + Send + Sync + 'static>(config: T) {
    if let Ok(mut repo) = repository().write() {
        repo.register(config);
    }
}

/// Get a config from the global repository
pub fn get<T: Any + Send + Sync + Clone + 'static>() -> Option<T> {
    repository().read().ok()?.get::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Limits {
        max: usize,
    }

    #[test]
    fn test_register_replaces_by_type() {
        let mut repo = ConfigRepository::new();
        assert_eq!(repo.get::<Limits>(), None);

        repo.register(Limits { max: 1 });
        repo.register(Limits { max: 2 });
        assert_eq!(repo.get::<Limits>(), Some(Limits { max: 2 }));
    }
}
