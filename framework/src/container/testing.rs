//! Per-thread container overrides for tests
//!
//! ```rust,ignore
//! #[tokio::test]
//! async fn lists_users() {
//!     let _guard = TestContainer::fake();
//!     TestContainer::bind::<dyn UserStore>(Arc::new(InMemoryUserStore::new()));
//!     // handlers resolving `dyn UserStore` on this thread now get the fake
//! }
//! ```
//!
//! `#[tokio::test]` runs on a current-thread runtime, so handlers driven by the
//! test see the same thread-local container.

use super::{Container, TEST_CONTAINER};
use std::sync::Arc;

pub struct TestContainer;

impl TestContainer {
    /// Install an empty test container for this thread
    ///
    /// The override is removed when the returned guard is dropped.
    #[must_use = "the test container is cleared when the guard is dropped"]
    pub fn fake() -> TestContainerGuard {
        TEST_CONTAINER.with(|c| *c.borrow_mut() = Some(Container::new()));
        TestContainerGuard { _private: () }
    }

    /// Bind a trait object in the test container
    pub fn bind<T: ?Sized + Send + Sync + 'static>(instance: Arc<T>) {
        TEST_CONTAINER.with(|c| {
            c.borrow_mut()
                .get_or_insert_with(Container::new)
                .bind(instance)
        });
    }
}

/// Clears the thread's test container on drop
pub struct TestContainerGuard {
    _private: (),
}

impl Drop for TestContainerGuard {
    fn drop(&mut self) {
        TEST_CONTAINER.with(|c| *c.borrow_mut() = None);
    }
}
