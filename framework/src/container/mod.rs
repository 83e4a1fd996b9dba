//! Application container for dependency injection
//!
//! Services are registered once at bootstrap and resolved from handlers:
//!
//! ```rust,ignore
//! use kit::{bind, App};
//!
//! bind!(dyn UserStore, InMemoryUserStore::seeded());
//!
//! let store: Arc<dyn UserStore> = App::resolve_make::<dyn UserStore>()?;
//! ```
//!
//! Tests swap implementations per thread through [`testing::TestContainer`].

pub mod testing;

use crate::error::FrameworkError;
use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

/// Global application container
static APP_CONTAINER: OnceLock<RwLock<Container>> = OnceLock::new();

// Thread-local test overrides for isolated testing
thread_local! {
    pub(crate) static TEST_CONTAINER: RefCell<Option<Container>> = const { RefCell::new(None) };
}

/// Type-erased service registry keyed by `TypeId`
///
/// Trait objects are stored as `Arc<dyn Trait>` under
/// `TypeId::of::<Arc<dyn Trait>>()`.
#[derive(Default)]
pub struct Container {
    bindings: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a trait object (or any `?Sized` type) behind an `Arc`
    pub fn bind<T: ?Sized + Send + Sync + 'static>(&mut self, instance: Arc<T>) {
        self.bindings.insert(TypeId::of::<Arc<T>>(), Arc::new(instance));
    }

    /// Resolve a trait binding
    pub fn make<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.bindings
            .get(&TypeId::of::<Arc<T>>())?
            .downcast_ref::<Arc<T>>()
            .cloned()
    }

    pub fn has_binding<T: ?Sized + 'static>(&self) -> bool {
        self.bindings.contains_key(&TypeId::of::<Arc<T>>())
    }
}

fn global() -> &'static RwLock<Container> {
    APP_CONTAINER.get_or_init(|| RwLock::new(Container::new()))
}

/// Run `f` against the thread's test container, if one is active
fn with_test<R>(f: impl FnOnce(&Container) -> Option<R>) -> Option<R> {
    TEST_CONTAINER.with(|c| c.borrow().as_ref().and_then(f))
}

/// Static facade over the global container
///
/// Resolution checks the thread-local test container first.
pub struct App;

impl App {
    /// Initialize the application container
    pub fn init() {
        global();
    }

    /// Bind a trait object to an implementation
    pub fn bind<T: ?Sized + Send + Sync + 'static>(instance: Arc<T>) {
        if let Ok(mut c) = global().write() {
            c.bind(instance);
        }
    }

    /// Resolve a trait binding
    pub fn make<T: ?Sized + Send + Sync + 'static>() -> Option<Arc<T>> {
        with_test(|c| c.make::<T>()).or_else(|| global().read().ok()?.make::<T>())
    }

    /// Resolve a trait binding, or a 500 `ServiceNotFound` error
    ///
    /// ```rust,ignore
    /// pub async fn index(_req: Request) -> Response {
    ///     let store = App::resolve_make::<dyn UserStore>()?;
    ///     // ...
    /// }
    /// ```
    pub fn resolve_make<T: ?Sized + Send + Sync + 'static>() -> Result<Arc<T>, FrameworkError> {
        Self::make::<T>().ok_or_else(FrameworkError::service_not_found::<T>)
    }

    /// Check if a trait binding is registered
    pub fn has_binding<T: ?Sized + 'static>() -> bool {
        with_test(|c| c.has_binding::<T>().then_some(())).is_some()
            || global()
                .read()
                .map(|c| c.has_binding::<T>())
                .unwrap_or(false)
    }
}

/// Bind a trait to a singleton implementation (auto-wraps in Arc)
///
/// ```rust,ignore
/// bind!(dyn UserStore, InMemoryUserStore::seeded());
/// ```
#[macro_export]
macro_rules! bind {
    ($trait:ty, $instance:expr) => {
        $crate::App::bind::<$trait>(::std::sync::Arc::new($instance) as ::std::sync::Arc<$trait>)
    };
}
